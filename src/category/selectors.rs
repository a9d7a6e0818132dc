//! Icon and color pickers for the category form.

use maud::{Markup, html};

use crate::html::{
    FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
};

/// Icons for income sources, shown in the first row.
const INCOME_ICONS: [&str; 5] = ["briefcase", "gift", "trending-up", "coins", "hand-coins"];

/// Icons for accounts, shown in the second row.
const ACCOUNT_ICONS: [&str; 5] = ["wallet", "credit-card", "piggy-bank", "landmark", "banknote"];

/// Icons for expenses, shown in the third row and below.
const EXPENSE_ICONS: [&str; 8] = [
    "shopping-cart",
    "utensils",
    "car",
    "home",
    "heart-pulse",
    "shirt",
    "film",
    "plane",
];

/// The color tokens a category card can use.
pub const COLOR_OPTIONS: [&str; 8] = [
    "blue", "green", "red", "yellow", "purple", "pink", "orange", "gray",
];

/// The icons offered for a category in `category_row`.
pub fn icon_options(category_row: i64) -> &'static [&'static str] {
    match category_row {
        i64::MIN..=1 => &INCOME_ICONS[..],
        2 => &ACCOUNT_ICONS[..],
        _ => &EXPENSE_ICONS[..],
    }
}

/// The background class for a color token's swatch.
pub fn color_swatch_class(color: &str) -> &'static str {
    match color {
        "blue" => "bg-blue-500",
        "green" => "bg-green-500",
        "red" => "bg-red-500",
        "yellow" => "bg-yellow-400",
        "purple" => "bg-purple-500",
        "pink" => "bg-pink-500",
        "orange" => "bg-orange-500",
        _ => "bg-gray-500",
    }
}

/// Render the icon picker with `selected_icon` checked.
///
/// An icon that is not offered for the row (e.g. after the category was
/// moved) is kept as the first option so saving does not silently change it.
pub fn icon_selector(selected_icon: &str, category_row: i64) -> Markup {
    let offered = icon_options(category_row);
    let keep_selected =
        !selected_icon.is_empty() && !offered.iter().any(|icon| *icon == selected_icon);
    let icons = keep_selected
        .then_some(selected_icon)
        .into_iter()
        .chain(offered.iter().copied());

    radio_group("icon", "Icon", selected_icon, icons, |_| None)
}

/// Render the color picker with `selected_color` checked.
pub fn color_selector(selected_color: &str) -> Markup {
    radio_group(
        "color",
        "Color",
        selected_color,
        COLOR_OPTIONS.iter().copied(),
        |color| Some(color_swatch_class(color)),
    )
}

fn radio_group<'a>(
    name: &str,
    legend: &str,
    selected: &str,
    options: impl Iterator<Item = &'a str>,
    swatch: impl Fn(&str) -> Option<&'static str>,
) -> Markup {
    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { (legend) }

            div class=(format!("{FORM_RADIO_GROUP_STYLE} max-h-48 overflow-y-auto"))
            {
                @for option in options {
                    @let id = format!("{name}-{option}");

                    div class="flex items-center gap-3"
                    {
                        input
                            name=(name)
                            id=(id)
                            type="radio"
                            value=(option)
                            checked[option == selected]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for=(id)
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            @if let Some(swatch_class) = swatch(option) {
                                span class=(format!("inline-block w-3 h-3 me-2 rounded-full {swatch_class}")) {}
                            }
                            (option)
                        }
                    }
                }
            }
        }
    }
}
