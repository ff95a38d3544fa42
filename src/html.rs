use maud::{DOCTYPE, Markup, PreEscaped, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card container for the sections of the client page
pub const CARD_STYLE: &str = "w-full p-4 bg-white rounded-lg shadow \
    dark:bg-gray-800 dark:border dark:border-gray-700";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

const HTMX_URL: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";
const HTMX_RESPONSE_TARGETS_URL: &str =
    "https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.min.js";
const TAILWIND_URL: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }

                script src=(TAILWIND_URL) {}
                script src=(HTMX_URL) {}
                script src=(HTMX_RESPONSE_TARGETS_URL) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for error responses swapped in by htmx
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Returns the CSS styles for adding a currency symbol prefix to number inputs.
pub fn currency_input_styles(currency_symbol: &str) -> HeadElement {
    let escaped_symbol = currency_symbol.replace('\\', "\\\\").replace('\'', "\\'");

    HeadElement::Style(PreEscaped(format!(
        r#"
        .input-wrapper {{
            position: relative;
            display: block;
        }}
        .input-wrapper input[type="number"] {{
            padding-left: 1.6rem;
        }}
        .input-wrapper::before {{
            content: '{escaped_symbol}';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }}
        "#
    )))
}

/// Format `number` to two decimal places, prefixed with `currency_symbol`.
///
/// Digits are not grouped, e.g. `1234.5` with "$" is rendered as "$1234.50".
pub fn format_currency(number: f64, currency_symbol: &str) -> String {
    if number < 0.0 {
        format!("-{currency_symbol}{:.2}", number.abs())
    } else {
        format!("{currency_symbol}{number:.2}")
    }
}

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Format `date` for display, e.g. "Jan 2, 2024".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{format_currency, format_date};

    #[test]
    fn formats_currency_to_two_decimal_places() {
        assert_eq!(format_currency(12.3, "$"), "$12.30");
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(150.0, "$"), "$150.00");
    }

    #[test]
    fn formats_currency_with_configured_symbol() {
        assert_eq!(format_currency(99.999, "₹"), "₹100.00");
        assert_eq!(format_currency(5.5, "€"), "€5.50");
    }

    #[test]
    fn formats_negative_currency_with_leading_minus() {
        assert_eq!(format_currency(-4.25, "$"), "-$4.25");
    }

    #[test]
    fn formats_date_with_short_month() {
        assert_eq!(format_date(date!(2024 - 01 - 02)), "Jan 2, 2024");
        assert_eq!(format_date(date!(2023 - 12 - 25)), "Dec 25, 2023");
    }
}
