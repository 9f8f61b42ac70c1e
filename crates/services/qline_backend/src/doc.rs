// --- File: crates/services/qline_backend/src/doc.rs ---

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use qline_auth::UserProfile;
use qline_calendar::{
    AvailabilityState, AvailabilityTier, CalendarView, MonthOffset, Period, PeriodView,
    RenderedCell, SlotOffering, SlotView, TimeSlotInput,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{
    CalendarQuery, Direction, GroupSlotsRequest, MeResponse, NavigateRequest, NavigateResponse,
    PageResponse,
};

#[utoipa::path(
    get,
    path = "/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Rendered month with one state per day", body = CalendarView),
        (status = 400, description = "Inverted range, invalid month or unparsable date",
         example = json!({
             "error": {
                 "message": "Validation error: Invalid date range: min date 2024-05-01 is after max date 2024-04-01",
                 "code": 400
             }
         })
        )
    )
)]
fn doc_get_calendar_handler() {}

#[utoipa::path(
    post,
    path = "/calendar/navigate",
    request_body(content = NavigateRequest, example = json!({
        "month": "2024-12",
        "direction": "next"
    })),
    responses(
        (status = 200, description = "The adjacent month", body = NavigateResponse,
         example = json!({"month": "2025-01", "label": "January 2025"})
        )
    )
)]
fn doc_navigate_handler() {}

#[utoipa::path(
    post,
    path = "/slots/group",
    request_body(content = GroupSlotsRequest, example = json!({
        "slots": [
            {"time": "9:00 AM", "total_capacity": 10, "booked_count": 1},
            {"time": "5:30 PM", "total_capacity": 10, "booked_count": 10}
        ],
        "selected_time": "9:00 AM"
    })),
    responses(
        (status = 200, description = "Slots grouped by period, empty periods left out", body = Vec<PeriodView>),
        (status = 400, description = "Slot outside 08:00-20:00, overbooked or listed twice",
         example = json!({
             "error": {
                 "message": "Validation error: Time slot 9:00 AM is listed more than once",
                 "code": 400
             }
         })
        )
    )
)]
fn doc_group_slots_handler() {}

#[utoipa::path(
    get,
    path = "/admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Admin page data", body = PageResponse),
        (status = 303, description = "Not an admin: sent to login or to the caller's home",
         headers(("location" = String, description = "Redirect target")))
    )
)]
fn doc_admin_page_handler() {}

#[utoipa::path(
    get,
    path = "/business/dashboard",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Business dashboard data", body = PageResponse),
        (status = 303, description = "Not a business: sent to login or to the caller's home",
         headers(("location" = String, description = "Redirect target")))
    )
)]
fn doc_business_dashboard_handler() {}

#[utoipa::path(
    get,
    path = "/customer",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Customer page data", body = PageResponse),
        (status = 303, description = "Not a customer: sent to login or to the caller's home",
         headers(("location" = String, description = "Redirect target")))
    )
)]
fn doc_customer_page_handler() {}

#[utoipa::path(
    get,
    path = "/me",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Signed-in profile with normalized phone", body = MeResponse),
        (status = 401, description = "No session",
         example = json!({
             "error": {"message": "Authentication error: No active session", "code": 401}
         })
        ),
        (status = 504, description = "Session or profile lookup timed out",
         example = json!({
             "error": {"message": "Timeout: Timed out fetching session", "code": 504}
         })
        )
    )
)]
fn doc_me_handler() {}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Qline API",
        version = "0.1.0",
        description = "Booking calendar, time slots and role-gated pages",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        doc_get_calendar_handler,
        doc_navigate_handler,
        doc_group_slots_handler,
        doc_admin_page_handler,
        doc_business_dashboard_handler,
        doc_customer_page_handler,
        doc_me_handler
    ),
    components(
        schemas(
            CalendarView,
            RenderedCell,
            MonthOffset,
            AvailabilityState,
            Direction,
            NavigateRequest,
            NavigateResponse,
            GroupSlotsRequest,
            TimeSlotInput,
            PeriodView,
            SlotView,
            Period,
            SlotOffering,
            AvailabilityTier,
            PageResponse,
            MeResponse,
            UserProfile
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "qline", description = "Qline booking API")
    ),
    servers(
        (url = "/api", description = "Qline API server")
    )
)]
pub struct QlineApiDoc;
