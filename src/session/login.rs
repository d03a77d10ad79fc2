//! Login form discovery
//!
//! The login page is an ordinary HTML form. The credentials form is the one
//! holding the `pass` input; the user name goes into the input with id
//! `user`. Hidden inputs (tokens, redirect targets) are submitted unchanged.

use scraper::{ElementRef, Html, Selector};
use url::Url;

const PASSWORD_FIELD: &str = "pass";
const DEFAULT_USER_FIELD: &str = "user";

/// HTTP method used to submit a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

/// Credentials form found on a login page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Absolute submission URL
    pub action: Url,

    pub method: FormMethod,

    /// Name of the user name input
    pub user_field: String,

    /// Hidden inputs carried over as-is
    pub hidden: Vec<(String, String)>,
}

impl LoginForm {
    /// Finds the credentials form in `html`
    ///
    /// Returns None if no form contains a `pass` input or its action cannot
    /// be resolved against `page_url`.
    pub fn parse(html: &str, page_url: &Url) -> Option<Self> {
        let document = Html::parse_document(html);
        let form_selector = Selector::parse("form").ok()?;
        let pass_selector = Selector::parse("input[name='pass']").ok()?;

        let form = document
            .select(&form_selector)
            .find(|form| form.select(&pass_selector).next().is_some())?;

        let action = match form.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => page_url.join(action).ok()?,
            _ => page_url.clone(),
        };

        let method = match form.value().attr("method") {
            Some(m) if m.trim().eq_ignore_ascii_case("get") => FormMethod::Get,
            _ => FormMethod::Post,
        };

        let user_field = find_user_field(&form).unwrap_or_else(|| DEFAULT_USER_FIELD.to_string());
        let hidden = collect_hidden_inputs(&form, &user_field);

        Some(Self {
            action,
            method,
            user_field,
            hidden,
        })
    }

    /// Form fields to submit for the given credentials
    pub fn fields(&self, username: &str, password: &str) -> Vec<(String, String)> {
        let mut fields = self.hidden.clone();
        fields.push((self.user_field.clone(), username.to_string()));
        fields.push((PASSWORD_FIELD.to_string(), password.to_string()));
        fields
    }
}

/// Name of the input with id `user`, if it has one
fn find_user_field(form: &ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("input#user[name]").ok()?;
    form.select(&selector)
        .next()
        .and_then(|input| input.value().attr("name"))
        .map(str::to_string)
}

fn collect_hidden_inputs(form: &ElementRef<'_>, user_field: &str) -> Vec<(String, String)> {
    let mut hidden = Vec::new();

    if let Ok(selector) = Selector::parse("input[type='hidden'][name]") {
        for input in form.select(&selector) {
            let Some(name) = input.value().attr("name") else {
                continue;
            };
            if name == user_field || name == PASSWORD_FIELD {
                continue;
            }
            let value = input.value().attr("value").unwrap_or_default();
            hidden.push((name.to_string(), value.to_string()));
        }
    }

    hidden
}
