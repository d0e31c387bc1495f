pub mod booking;
pub mod payment;
pub mod refund;
pub mod room;
pub mod user;

pub use booking::{Booking, NewBooking};
pub use payment::{NewPayment, Payment, PaymentOption, mask_card_number};
pub use refund::{Refund, RefundRequest};
pub use room::Room;
pub use user::{AuthUser, RegisterRequest, TokenResponse, UserProfile};
