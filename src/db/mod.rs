pub mod chatbotdb;
pub mod chatdb;
pub mod contractdb;
pub mod db;
pub mod eventdb;
pub mod notificationdb;
pub mod reviewdb;
pub mod userdb;
pub mod vendordb;
