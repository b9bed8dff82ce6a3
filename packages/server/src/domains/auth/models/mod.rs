pub mod otp;
pub mod phone;

pub use otp::{OtpRecord, OTP_ATTEMPTS, OTP_DIGITS, OTP_TTL_MINUTES};
pub use phone::PhoneNumber;
