/// Server-rendered HTML pages
///
/// Static pages, the menu listing, single menu item pages and the
/// reservation form. Pages read from the same repositories as the JSON API
/// and hold no business logic of their own; form submissions go through the
/// booking conflict guard.
///
/// # Pages
///
/// - `GET /`, `/home/`, `/about/` - Static pages
/// - `GET POST /book/` - Reservation form
/// - `GET /reservations/?date=YYYY-MM-DD` - Bookings on a date (default: today)
/// - `GET /menu-page/` - Menu listing
/// - `GET /menu_item/:id/` - Single menu item (404 page when absent)

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use chrono::NaiveDate;
use littlelemon_shared::{
    models::{
        booking::{Booking, NewBooking, DEFAULT_SLOT},
        menu_item::MenuItem,
    },
    reservations::{self, ReservationError},
};
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::routes::reservations::DateQuery;

/// Build the page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/home/", get(home))
        .route("/about/", get(about))
        .route("/book/", get(book_form).post(book_submit))
        .route("/reservations/", get(reservations_page))
        .route("/menu-page/", get(menu_page))
        .route("/menu_item/:id/", get(menu_item_page))
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate;

/// Reservation form, optionally with the outcome of the last submission.
#[derive(Template)]
#[template(path = "book.html")]
struct BookTemplate {
    form: BookForm,
    success: Option<String>,
    errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "reservations.html")]
struct ReservationsTemplate {
    date: NaiveDate,
    bookings: Vec<Booking>,
}

#[derive(Template)]
#[template(path = "menu.html")]
struct MenuTemplate {
    items: Vec<MenuItem>,
}

#[derive(Template)]
#[template(path = "menu_item.html")]
struct MenuItemTemplate {
    item: MenuItem,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    message: String,
}

fn render(template: &impl Template) -> ApiResult<Html<String>> {
    Ok(Html(template.render()?))
}

/// Reservation form fields as submitted by the browser.
///
/// Kept as raw strings so the form can be re-rendered with whatever the
/// guest typed when parsing fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub reservation_date: String,
    #[serde(default)]
    pub reservation_slot: String,
}

impl BookForm {
    /// Parses the raw fields into a validated booking request.
    ///
    /// Returns one message per offending field.
    pub fn parse(&self) -> Result<NewBooking, Vec<String>> {
        let mut errors = Vec::new();

        let date = match NaiveDate::parse_from_str(self.reservation_date.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("reservation_date: enter a date as YYYY-MM-DD".to_string());
                None
            }
        };

        let slot_raw = self.reservation_slot.trim();
        let slot = if slot_raw.is_empty() {
            Some(DEFAULT_SLOT)
        } else {
            match slot_raw.parse::<i16>() {
                Ok(slot) => Some(slot),
                Err(_) => {
                    errors.push("reservation_slot: enter a whole number".to_string());
                    None
                }
            }
        };

        let (Some(reservation_date), Some(reservation_slot)) = (date, slot) else {
            return Err(errors);
        };

        let booking = NewBooking {
            first_name: self.first_name.trim().to_string(),
            reservation_date,
            reservation_slot,
        };

        if let Err(e) = booking.validate() {
            let mut fields: Vec<String> = e
                .field_errors()
                .into_iter()
                .flat_map(|(field, errs)| {
                    errs.iter().map(move |err| match &err.message {
                        Some(msg) => format!("{}: {}", field, msg),
                        None => format!("{}: invalid value", field),
                    })
                })
                .collect();
            fields.sort();
            return Err(fields);
        }

        Ok(booking)
    }
}

async fn index() -> ApiResult<Html<String>> {
    render(&IndexTemplate)
}

async fn home() -> ApiResult<Html<String>> {
    render(&HomeTemplate)
}

async fn about() -> ApiResult<Html<String>> {
    render(&AboutTemplate)
}

async fn book_form() -> ApiResult<Html<String>> {
    render(&BookTemplate {
        form: BookForm::default(),
        success: None,
        errors: Vec::new(),
    })
}

/// Handles a reservation form post.
///
/// Re-renders the form with a success message, or with the submitted values
/// and the reasons the booking was refused.
async fn book_submit(
    State(state): State<AppState>,
    form: Result<Form<BookForm>, FormRejection>,
) -> ApiResult<Response> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable booking form");
            let page = BookTemplate {
                form: BookForm::default(),
                success: None,
                errors: vec!["The form could not be read; please try again".to_string()],
            };
            return Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response());
        }
    };

    let data = match form.parse() {
        Ok(data) => data,
        Err(errors) => {
            let page = BookTemplate {
                form,
                success: None,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)?).into_response());
        }
    };

    match reservations::submit_booking(state.bookings.as_ref(), data).await {
        Ok(booking) => {
            let page = BookTemplate {
                form: BookForm::default(),
                success: Some(format!(
                    "Thanks {}, your table is booked for {} (slot {})",
                    booking.first_name, booking.reservation_date, booking.reservation_slot
                )),
                errors: Vec::new(),
            };
            Ok(render(&page)?.into_response())
        }
        Err(ReservationError::Conflict { date, slot }) => {
            let page = BookTemplate {
                form,
                success: None,
                errors: vec![format!(
                    "Slot {} on {} is already booked; please pick another",
                    slot, date
                )],
            };
            Ok((StatusCode::CONFLICT, render(&page)?).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn reservations_page(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> ApiResult<Html<String>> {
    let date = query.date_or_today();
    let bookings = reservations::list_bookings(state.bookings.as_ref(), date).await?;
    render(&ReservationsTemplate { date, bookings })
}

async fn menu_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let items = state.menu.list().await?;
    render(&MenuTemplate { items })
}

async fn menu_item_page(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Response> {
    match state.menu.get(id).await? {
        Some(item) => Ok(render(&MenuItemTemplate { item })?.into_response()),
        None => {
            let page = NotFoundTemplate {
                message: format!("Menu item {} not found", id),
            };
            Ok((StatusCode::NOT_FOUND, render(&page)?).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, date: &str, slot: &str) -> BookForm {
        BookForm {
            first_name: name.to_string(),
            reservation_date: date.to_string(),
            reservation_slot: slot.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let booking = form("Alice", "2024-05-01", "3").parse().unwrap();
        assert_eq!(booking.first_name, "Alice");
        assert_eq!(booking.reservation_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(booking.reservation_slot, 3);
    }

    #[test]
    fn test_parse_blank_slot_uses_default() {
        let booking = form("Alice", "2024-05-01", "").parse().unwrap();
        assert_eq!(booking.reservation_slot, DEFAULT_SLOT);
    }

    #[test]
    fn test_parse_reports_each_bad_field() {
        let errors = form("Alice", "May first", "three").parse().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("reservation_date"));
        assert!(errors[1].starts_with("reservation_slot"));
    }

    #[test]
    fn test_parse_rejects_blank_name() {
        let errors = form("  ", "2024-05-01", "3").parse().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("first_name"));
    }

    #[test]
    fn test_templates_render() {
        let item = MenuItem {
            id: 7,
            name: "IceCream".to_string(),
            price: 80,
            description: "Delicious".to_string(),
        };
        let html = MenuItemTemplate { item }.render().unwrap();
        assert!(html.contains("IceCream"));
        assert!(html.contains("80"));

        let html = BookTemplate {
            form: BookForm::default(),
            success: Some("booked".to_string()),
            errors: vec![],
        }
        .render()
        .unwrap();
        assert!(html.contains("booked"));
    }
}
