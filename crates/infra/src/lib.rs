pub mod docx;
pub mod youtube;
