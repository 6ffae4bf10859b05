/// The numeric credential guarding an account.
///
/// The core compares PINs for equality and nothing more; digit-range
/// validation belongs to the input layer. No `Display` impl, so a PIN never
/// ends up in rendered output by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin(pub u32);
