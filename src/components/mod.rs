pub mod audit_form;
pub mod contact_form;
pub mod faq;
pub mod floating_button;
pub mod link_tracking;
pub mod mobile_nav;
pub mod popup;
pub mod reveal;
pub mod smooth_scroll;
