mod cookie;
mod session;
mod token;

pub use session::{
    CookieInspection, append_cleared_cookies, get_authenticated_user, inspect_auth_cookies,
    prepare_logout_response,
};
pub(crate) use session::create_new_session;
