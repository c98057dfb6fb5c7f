use serde::{Deserialize, Serialize};

// Uniform response envelope
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;
/// Highest page whose offset still fits in an `i64`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PER_PAGE;

/// `?page=&per_page=` query parameters shared by list endpoints.
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// One page of results plus the unpaged total.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub params: PageParams,
}

impl<T> Page<T> {
    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            request_id: None,
            pagination: Some(Pagination::new(
                self.params.page(),
                self.params.per_page(),
                self.total,
            )),
            total_count: Some(self.total),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(
        success: bool,
        code: u16,
        message: &str,
        data: Option<T>,
        errors: Option<Vec<ErrorDetail>>,
    ) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data,
            meta: None,
            errors,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, message: &str, field: Option<String>) -> Self {
        Self::build(
            false,
            code,
            message,
            None,
            Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
        )
    }

    pub fn success(data: T, message: &str) -> Self {
        Self::build(true, 200, message, Some(data), None)
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        let mut response = Self::build(true, 200, message, Some(data), None);
        response.meta = Some(meta);
        response
    }

    pub fn created(data: T, message: &str) -> Self {
        Self::build(true, 201, message, Some(data), None)
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message, None, None)
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self::build(false, 400, "Validation failed", None, Some(errors))
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, "BAD_REQUEST", message, None)
    }

    pub fn bad_request_with_code(message: &str, error_code: &str) -> Self {
        Self::failure(400, error_code, message, None)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, "UNAUTHORIZED", message, None)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, "FORBIDDEN", message, None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, "NOT_FOUND", message, None)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, error_code, message, field)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, "INTERNAL_ERROR", message, None)
    }

    pub fn service_unavailable(message: &str) -> Self {
        Self::failure(503, "SERVICE_UNAVAILABLE", message, None)
    }
}

// Business error codes
pub mod error_codes {
    pub const AUTH_INVALID_CREDENTIALS: &str = "AUTH_INVALID_CREDENTIALS";
    pub const USER_EMAIL_EXISTS: &str = "USER_EMAIL_EXISTS";
    pub const PROJECT_SLUG_EXISTS: &str = "PROJECT_SLUG_EXISTS";
    pub const POST_SLUG_EXISTS: &str = "POST_SLUG_EXISTS";
    pub const BOOKING_CONFLICT: &str = "BOOKING_CONFLICT";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const RESOURCE_IN_USE: &str = "RESOURCE_IN_USE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_math() {
        let p = Pagination::new(1, 20, 45);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let last = Pagination::new(3, 20, 45);
        assert!(!last.has_next);
        assert!(last.has_prev);

        let empty = Pagination::new(1, 20, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
    }

    #[test]
    fn page_params_are_clamped() {
        let params = PageParams {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), MAX_PER_PAGE);
        assert_eq!(params.offset(), 0);

        let params = PageParams {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let params = PageParams {
            page: Some(i64::MAX),
            per_page: Some(MAX_PER_PAGE),
        };
        assert_eq!(params.page(), MAX_PAGE);
        assert_eq!(params.offset(), (MAX_PAGE - 1) * MAX_PER_PAGE);
        assert!(params.offset() > 0);

        let meta = Page::<()> {
            items: Vec::new(),
            total: 3,
            params,
        }
        .meta();
        let pagination = meta.pagination.unwrap();
        assert!(!pagination.has_next);
        assert!(pagination.has_prev);
    }

    #[test]
    fn failure_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::conflict(
            "Resource already booked",
            Some("start_time".into()),
            error_codes::BOOKING_CONFLICT,
        ))
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 409);
        assert_eq!(body["errors"][0]["code"], "BOOKING_CONFLICT");
        assert!(body.get("data").is_none());
    }
}
