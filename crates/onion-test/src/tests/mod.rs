//! Coordinator behavior driven through [`HeadlessPlatform`](crate::HeadlessPlatform).

mod framebuffer;
mod mouse;
