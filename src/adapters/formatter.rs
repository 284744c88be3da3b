//! Reply text for the chat host.

use crate::domain::model::{DailyMenu, MenuItem, MenuKind, Query, ResolutionFailure};

const HEADER: &str = "*LUNCH!*";

fn emoji(kind: MenuKind) -> &'static str {
    match kind {
        MenuKind::Soup => ":tea:",
        MenuKind::Vegetarian => ":tomato:",
        MenuKind::Meat => ":poultry_leg:",
        MenuKind::Grill => ":meat_on_bone:",
        MenuKind::Pasta => ":spaghetti:",
    }
}

fn format_item(item: &MenuItem) -> String {
    format!(
        "{} {} (€{:.2} / €{:.2})",
        emoji(item.kind),
        item.name,
        item.price_student,
        item.price_staff
    )
}

/// Menu items in a fixed order: soup, vegetarian, meat, grill, pasta.
pub fn format_menu(menu: &DailyMenu) -> String {
    let order = [
        MenuKind::Soup,
        MenuKind::Vegetarian,
        MenuKind::Meat,
        MenuKind::Grill,
        MenuKind::Pasta,
    ];
    order
        .iter()
        .flat_map(|kind| menu.items.iter().filter(move |item| item.kind == *kind))
        .map(format_item)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn menu_title(query: &Query) -> String {
    format!("Menu komida {}", query)
}

pub fn format_menu_reply(query: &Query, menu: &DailyMenu) -> String {
    format!("{}\n*{}*\n{}", HEADER, menu_title(query), format_menu(menu))
}

pub fn format_missing_menu(query: &Query) -> String {
    format!(
        "_COMPUTER SAYS NO._ I'm sorry, no menu has been found for {}.",
        query
    )
}

pub fn format_failure(failure: &ResolutionFailure) -> String {
    match failure {
        ResolutionFailure::AmbiguousCampus { phrase, .. } => format!(
            "I'm sorry, I could not understand which campus you meant by '{}'.",
            phrase
        ),
    }
}
