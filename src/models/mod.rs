pub mod chatbotmodel;
pub mod chatmodels;
pub mod contractmodels;
pub mod eventmodel;
pub mod notificationmodel;
pub mod reviewmodel;
pub mod usermodel;
pub mod vendormodels;
