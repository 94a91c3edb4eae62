pub mod extreme_page;
pub mod footer;
pub mod forecast_page;
pub mod header;
pub mod home_page;
pub mod image_view;
pub mod info_pages;
pub mod nav_search;
pub mod news_banner;
pub mod palette;
pub mod query_form;
pub mod result_view;
pub mod shell;
pub mod sidebar;
pub mod visual_page;
pub mod weather_card;
pub mod welcome_banner;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use extreme_page::{ExtremePage, ExtremePageProps};
pub use footer::{Footer, FooterProps};
pub use forecast_page::{ForecastPage, ForecastPageProps};
pub use header::{Header, HeaderProps};
pub use home_page::{HomePage, HomePageProps};
pub use image_view::{ImageSlot, ImageView, ImageViewProps};
pub use info_pages::{AboutPage, AboutPageProps, ContactPage, ContactPageProps};
pub use nav_search::{NavSearch, NavSearchProps};
pub use news_banner::{NewsBanner, NewsBannerProps};
pub use palette::Palette;
pub use query_form::{QueryForm, QueryFormProps};
pub use result_view::{ERROR_ICON, ResultView};
pub use shell::{AppShell, AppShellProps};
pub use sidebar::{Sidebar, SidebarProps};
pub use visual_page::{VisualPage, VisualPageProps};
pub use weather_card::{WeatherCard, WeatherCardProps};
pub use welcome_banner::{WelcomeBanner, WelcomeBannerProps};
