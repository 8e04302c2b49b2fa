mod connectors;
mod feature_card;
mod page;
mod popup;
mod preview;
mod scroll_button;
mod status_bar;

pub use connectors::ConnectorsWidget;
pub use feature_card::FeatureCardWidget;
pub use page::PageWidget;
pub use popup::PopupWidget;
pub use preview::PreviewWidget;
pub use scroll_button::ScrollButtonWidget;
pub use status_bar::StatusBarWidget;
