// --- File: crates/services/qline_backend/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    http::Uri,
    response::Response,
    Extension, Json,
};
use chrono::NaiveDate;
use qline_auth::UserProfile;
use qline_calendar::{
    CalendarPicker, CalendarProps, CalendarView, DateKey, PeriodView, TimeSlot, TimeSlotInput,
    TimeSlotPicker, YearMonth,
};
use qline_common::{map_json_error, not_found, parse_error, validation_error, QlineError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app_state::AppState;

/// Query for `GET /api/calendar`. Date lists are comma separated.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub selected: Option<NaiveDate>,
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    pub disabled: Option<String>,
    pub booked: Option<String>,
    /// Overrides the server's notion of today
    pub today: Option<NaiveDate>,
}

fn parse_date_keys(raw: Option<&str>) -> Result<Vec<DateKey>, QlineError> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<DateKey>().map_err(parse_error))
        .collect()
}

pub async fn get_calendar_handler(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarView>, QlineError> {
    let props = CalendarProps {
        selected_date: query.selected,
        min_date: query.min,
        max_date: query.max,
        disabled_dates: parse_date_keys(query.disabled.as_deref())?,
        booked_dates: parse_date_keys(query.booked.as_deref())?,
    };
    let today = query.today.unwrap_or_else(|| state.display.today());

    let mut picker =
        CalendarPicker::new(props, today, state.display, |_| {}).map_err(validation_error)?;

    match (query.year, query.month) {
        (Some(year), Some(month)) => {
            let month = YearMonth::new(year, month).map_err(validation_error)?;
            picker = picker.starting_at(month);
        }
        (None, None) => {}
        _ => return Err(validation_error("year and month must be given together")),
    }

    debug!("Rendering calendar for {}", picker.current_month());
    Ok(Json(picker.render()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NavigateRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-12"))]
    pub month: YearMonth,
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NavigateResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-12"))]
    pub month: YearMonth,
    pub label: String,
}

pub async fn navigate_handler(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Json<NavigateResponse> {
    let month = match request.direction {
        Direction::Previous => request.month.previous(),
        Direction::Next => request.month.next(),
    };
    Json(NavigateResponse {
        month,
        label: state.display.month_label(month),
    })
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GroupSlotsRequest {
    pub slots: Vec<TimeSlotInput>,
    #[serde(default)]
    pub selected_time: Option<String>,
}

pub async fn group_slots_handler(
    Json(request): Json<GroupSlotsRequest>,
) -> Result<Json<Vec<PeriodView>>, Response> {
    let selected_time = request.selected_time;
    let grouped = request
        .slots
        .into_iter()
        .map(TimeSlot::try_from)
        .collect::<Result<Vec<_>, _>>()
        .and_then(|slots| {
            info!("Grouping {} time slots", slots.len());
            TimeSlotPicker::new(slots, selected_time, |_| {}).map(|picker| picker.render())
        });
    map_json_error(grouped, validation_error)
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PageResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub page: &'static str,
    pub user: UserProfile,
}

pub async fn admin_page_handler(Extension(user): Extension<UserProfile>) -> Json<PageResponse> {
    Json(PageResponse {
        page: "admin",
        user,
    })
}

pub async fn business_dashboard_handler(
    Extension(user): Extension<UserProfile>,
) -> Json<PageResponse> {
    Json(PageResponse {
        page: "business_dashboard",
        user,
    })
}

pub async fn customer_page_handler(Extension(user): Extension<UserProfile>) -> Json<PageResponse> {
    Json(PageResponse {
        page: "customer",
        user,
    })
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MeResponse {
    pub user: UserProfile,
    /// Normalized phone, `None` when missing or not a valid number
    pub phone: Option<String>,
}

/// Any signed-in user.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserProfile>,
) -> Json<MeResponse> {
    let phone = match user.normalized_phone(state.phone_validator.as_ref()) {
        Ok(phone) => phone,
        Err(e) => {
            debug!(user_id = %user.id, "Ignoring profile phone: {}", e);
            None
        }
    };
    Json(MeResponse { user, phone })
}

pub async fn api_not_found_handler(uri: Uri) -> QlineError {
    not_found(format!("No API route for {}", uri.path()))
}
