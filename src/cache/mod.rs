use ::redis::{AsyncCommands, Client, cmd};

use crate::error::AppError;

const REVOKED_PREFIX: &str = "revoked_token:";

fn revoked_key(jti: &str) -> String {
    format!("{}{}", REVOKED_PREFIX, jti)
}

async fn connection(
    redis_client: &Client,
) -> Result<::redis::aio::MultiplexedConnection, AppError> {
    redis_client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
}

/// Marks a token id as revoked until it would have expired anyway.
pub async fn revoke_token(redis_client: &Client, jti: &str, ttl: u64) -> Result<(), AppError> {
    if ttl == 0 {
        return Ok(());
    }
    let mut conn = connection(redis_client).await?;
    let _: () = conn
        .set_ex(revoked_key(jti), 1u8, ttl)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to revoke token: {}", e)))?;
    Ok(())
}

pub async fn is_token_revoked(redis_client: &Client, jti: &str) -> Result<bool, AppError> {
    let mut conn = connection(redis_client).await?;
    let exists: bool = conn
        .exists(revoked_key(jti))
        .await
        .map_err(|e| AppError::Internal(format!("Failed to check token revocation: {}", e)))?;
    Ok(exists)
}

/// Redis health check
pub async fn redis_health_check(redis_client: &Client) -> Result<bool, AppError> {
    let mut conn = connection(redis_client).await?;

    let pong: String = cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(|e| AppError::Internal(format!("Redis health check failed: {}", e)))?;

    Ok(pong == "PONG")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_keys_are_namespaced() {
        assert_eq!(revoked_key("abc"), "revoked_token:abc");
    }

    #[test]
    fn zero_ttl_is_a_no_op() {
        // No server is contacted when there is nothing left to revoke.
        let client = Client::open("redis://127.0.0.1:1/").unwrap();
        let result = tokio_test::block_on(revoke_token(&client, "abc", 0));
        assert!(result.is_ok());
    }
}
