/// Two-color gradients.
pub mod linear;
/// Multi-stop and interwoven gradients.
pub mod multi;
