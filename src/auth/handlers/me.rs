/**
 * Current Account Handler
 *
 * GET /api/v1/users/me (authenticated)
 *
 * Returns the sanitized account that the authentication middleware attached
 * to the request. No database access happens here; the middleware already
 * loaded and sanitized the row.
 */

use crate::auth::handlers::types::AccountResponse;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;

/// Current account handler
pub async fn me(AuthUser(account): AuthUser) -> ApiResponse<AccountResponse> {
    ApiResponse::ok(
        AccountResponse::from(&account),
        "Current account fetched successfully",
    )
}
