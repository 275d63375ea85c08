/// Integer literal helpers.
///
/// Reads the text of a number literal (optional sign, decimal or `0x` hex
/// digits) twice, once as a signed and once as an unsigned 64-bit integer,
/// and checks that both readings agree. Also holds the lossless conversions
/// the binding layer uses when a host function declares an unsigned slot.
pub mod num;
/// Native stack growth for deep recursion.
pub mod stack;
