//! The log-in and registration form.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, auth_card, loading_spinner, text_input},
};

/// Which of the two forms is shown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    LogIn,
    Register,
}

impl AuthMode {
    /// Parse the `mode` query parameter. Anything other than "register" shows the log-in form.
    pub fn from_query(mode: Option<&str>) -> Self {
        match mode {
            Some("register") => AuthMode::Register,
            _ => AuthMode::LogIn,
        }
    }

    fn title(self) -> &'static str {
        match self {
            AuthMode::LogIn => "Login",
            AuthMode::Register => "Register",
        }
    }

    fn endpoint(self) -> &'static str {
        match self {
            AuthMode::LogIn => endpoints::LOG_IN_API,
            AuthMode::Register => endpoints::REGISTER_API,
        }
    }
}

/// A message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Error(String),
    Success(String),
}

/// The query string of the log-in page, e.g. "?mode=register".
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub mode: Option<String>,
}

/// The values to fill the form with when it is shown again.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormValues<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Render the form for `mode` inside the auth card.
///
/// The form replaces the whole card when submitted so that the title and the
/// mode toggle follow the mode of the returned form.
pub fn auth_form(mode: AuthMode, values: FormValues, message: Option<&FormMessage>) -> Markup {
    let form = html! {
        @if let Some(message) = message {
            @match message {
                FormMessage::Error(text) => {
                    p
                        id="form-message"
                        role="alert"
                        class="p-3 text-sm text-red-800 rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400"
                    {
                        (text)
                    }
                }
                FormMessage::Success(text) => {
                    p
                        id="form-message"
                        role="status"
                        class="p-3 text-sm text-green-800 rounded-lg bg-green-50 dark:bg-gray-800 dark:text-green-400"
                    {
                        (text)
                    }
                }
            }
        }

        form
            hx-post=(mode.endpoint())
            hx-target="#auth-card"
            hx-swap="outerHTML"
            hx-disabled-elt="find button"
            class="space-y-4 md:space-y-6"
        {
            @if mode == AuthMode::Register {
                (text_input("name", "Full Name", "text", values.name, "Jane Doe"))
            }

            (text_input("email", "Email", "email", values.email, "name@example.com"))
            (text_input("password", "Password", "password", "", "••••••••"))

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator"
                {
                    (loading_spinner())
                    "Processing..."
                }
                span class="htmx-idle-label" { (mode.title()) }
            }
        }

        p class="text-sm font-light text-gray-500 dark:text-gray-400"
        {
            @match mode {
                AuthMode::LogIn => {
                    "Don't have an account? "
                    a href={ (endpoints::LOG_IN_VIEW) "?mode=register" } class=(LINK_STYLE) { "Register" }
                }
                AuthMode::Register => {
                    "Already have an account? "
                    a href=(endpoints::LOG_IN_VIEW) class=(LINK_STYLE) { "Login" }
                }
            }
        }
    };

    auth_card(mode.title(), &form)
}

#[cfg(test)]
mod auth_form_tests {
    use scraper::{ElementRef, Html, Selector};

    use crate::{
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form,
        },
    };

    use super::{AuthMode, FormMessage, FormValues, auth_form};

    fn render(mode: AuthMode, message: Option<&FormMessage>) -> Html {
        Html::parse_fragment(&auth_form(mode, FormValues::default(), message).into_string())
    }

    #[test]
    fn unknown_mode_falls_back_to_log_in() {
        assert_eq!(AuthMode::from_query(None), AuthMode::LogIn);
        assert_eq!(AuthMode::from_query(Some("admin")), AuthMode::LogIn);
        assert_eq!(AuthMode::from_query(Some("register")), AuthMode::Register);
    }

    #[test]
    fn log_in_form_asks_for_email_and_password() {
        let html = render(AuthMode::LogIn, None);
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::LOG_IN_API, "hx-post");
        assert_form_input(&form, "email", "email");
        assert_form_input(&form, "password", "password");
        assert_form_submit_button(&form);

        let name_input = Selector::parse("input[name=name]").unwrap();
        assert!(form.select(&name_input).next().is_none());
    }

    #[test]
    fn register_form_also_asks_for_name() {
        let html = render(AuthMode::Register, None);
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::REGISTER_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "email", "email");
        assert_form_input(&form, "password", "password");
    }

    #[test]
    fn swap_target_is_the_root_of_the_fragment() {
        for mode in [AuthMode::LogIn, AuthMode::Register] {
            let html = render(mode, None);
            let form = must_get_form(&html);
            let target = form.value().attr("hx-target").expect("hx-target missing");
            assert_eq!(form.value().attr("hx-swap"), Some("outerHTML"));

            let roots: Vec<ElementRef> = html
                .root_element()
                .children()
                .filter_map(ElementRef::wrap)
                .collect();
            assert_eq!(roots.len(), 1, "want a single root element");
            assert_eq!(
                roots[0].value().id().map(|id| format!("#{id}")),
                Some(target.to_owned()),
                "swapping the response into {target} must replace it, not nest inside it"
            );
        }
    }

    #[test]
    fn shows_message_above_form() {
        let message = FormMessage::Error("Invalid credentials".to_owned());
        let html = render(AuthMode::LogIn, Some(&message));

        let selector = Selector::parse("#form-message[role=alert]").unwrap();
        let message = html.select(&selector).next().expect("No message found");
        assert_eq!(message.text().collect::<String>().trim(), "Invalid credentials");
    }

    #[test]
    fn toggle_links_to_other_mode() {
        let html = render(AuthMode::LogIn, None);
        let link = Selector::parse("a[href='/log_in?mode=register']").unwrap();
        assert!(html.select(&link).next().is_some(), "missing register link");

        let html = render(AuthMode::Register, None);
        let link = Selector::parse("a[href='/log_in']").unwrap();
        assert!(html.select(&link).next().is_some(), "missing log in link");
    }
}
