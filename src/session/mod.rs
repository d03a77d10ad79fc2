//! Session module: the browsing context used for the crawl
//!
//! - `Session` / `SessionProvider`: the narrow capability the crawler uses
//! - `HttpSessionProvider`: cookie-based implementation over reqwest
//! - `LoginForm`: credentials form discovery on the login page

mod http;
mod login;
mod traits;

pub use http::{HttpSession, HttpSessionProvider};
pub use login::{FormMethod, LoginForm};
pub use traits::{RawPage, Session, SessionProvider};
