pub mod account_form;
pub mod app;
pub mod checker_home;
pub mod employee_list;
pub mod link;
pub mod login_screen;
pub mod maker_home;
pub mod nav_bar;
pub mod notice;
pub mod signup_screen;

pub use app::App;
pub use checker_home::CheckerHome;
pub use login_screen::LoginScreen;
pub use maker_home::MakerHome;
pub use notice::{Notice, NoticeBanner, NoticeLevel};
pub use signup_screen::SignupScreen;
