mod emailjs_client;

pub use emailjs_client::EmailJsClient;
