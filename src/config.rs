use log::Level;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const EMAILJS_PUBLIC_KEY: &str = "rF40lGBXuiItQQk4o";
pub const EMAILJS_SERVICE_ID: &str = "service_t58unpo";
pub const EMAILJS_TEMPLATE_ID: &str = "template_d5bsjet";

/// Inbox that receives contact form submissions.
pub const CONTACT_RECIPIENT: &str = "info@visibilitalocale.it";

/// WhatsApp number used in generated deep links, international format without the plus.
pub const WHATSAPP_NUMBER: &str = "393123456789";

pub const PHONE_SENTINEL: &str = "Non fornito";
pub const MESSAGE_SENTINEL: &str = "Nessun messaggio aggiuntivo";

/// Scroll offset past which the floating WhatsApp button shows.
pub const FLOATING_BUTTON_THRESHOLD: f64 = 100.0;
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const AUDIT_DELAY_MS: u32 = 3000;

pub const TIMESTAMP_LOCALE: &str = "it-IT";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
