pub mod admindtos;
pub mod calendardtos;
pub mod chatbotdtos;
pub mod chatdtos;
pub mod contractdtos;
pub mod eventdtos;
pub mod reviewdtos;
pub mod userdtos;
pub mod vendordtos;
