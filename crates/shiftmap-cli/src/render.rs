//! Plain-text views over coordinator state.
//!
//! Every function returns a `String` so the views can be asserted on without
//! capturing stdout.

use shiftmap_app::Screen;
use shiftmap_core::Shift;
use shiftmap_geocode::CityDisplayState;
use shiftmap_shifts::ShiftListState;

pub(crate) fn headline(city: &CityDisplayState) -> String {
    if city.loading {
        return "Locating city...".to_owned();
    }
    if let Some(headline) = city.headline() {
        return headline;
    }
    city.error
        .clone()
        .unwrap_or_else(|| "Shifts nearby".to_owned())
}

/// The list view: spinner on first load, the error if the last fetch failed,
/// otherwise one numbered row per shift.
pub(crate) fn list(state: &ShiftListState) -> String {
    if state.is_initial_load() {
        return "Loading shifts...".to_owned();
    }
    if state.has_error() {
        return format!("Error: {}", state.error);
    }
    if state.shifts.is_empty() {
        return if state.has_loaded {
            "No shifts found".to_owned()
        } else {
            String::new()
        };
    }

    let mut out = String::new();
    if state.is_refreshing() {
        out.push_str("Refreshing...\n");
    }
    for (index, shift) in state.shifts.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&row(index + 1, shift));
    }
    out
}

fn row(number: usize, shift: &Shift) -> String {
    let promo = if shift.is_promotion_enabled { " *" } else { "" };
    format!(
        "{number:>3}. {}{promo}\n     {}\n     {}\n     Recruited: {}\n     Pay: {} ₽\n",
        shift.company_name,
        shift.address,
        shift.schedule_label(),
        shift.workers_label(),
        shift.price_worker,
    )
}

pub(crate) fn detail(shift: &Shift) -> String {
    let mut lines = vec![shift.company_name.clone(), shift.address.clone()];
    if let Some(logo) = shift.logo_uri() {
        lines.push(format!("Logo: {logo}"));
    }
    lines.push(String::new());
    lines.push(format!("Date:       {}", shift.date_start_by_city));
    lines.push(format!("Time:       {}", shift.time_window()));
    lines.push(format!("Recruited:  {}", shift.workers_label()));
    lines.push(format!("Work type:  {}", shift.work_types_label()));
    lines.push(format!("Pay:        {} ₽", shift.price_worker));
    if shift.has_bonus() {
        lines.push(format!("Bonus:      {} ₽", shift.bonus_price_worker));
    }
    lines.push(format!("Rating:     {}", shift.rating_label()));
    if shift.is_promotion_enabled {
        lines.push("Promoted".to_owned());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub(crate) fn screen(screen: &Screen, list_state: &ShiftListState) -> String {
    match screen {
        Screen::List => list(list_state),
        Screen::Detail(shift) => detail(shift),
        Screen::Blank => String::new(),
    }
}
