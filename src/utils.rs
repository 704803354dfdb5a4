use core::fmt::{self, Display};

use parsing::tables::{TokenEntry, TokenTable};

/// Writes `Name(value)` using the `Display` form of `value`.
pub fn debug_print<T: Display + ?Sized>(
    name: &str,
    value: &T,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{name}({value})")
}

/// Entries of a bit table whose bits are all set in `bits`, in table order.
pub fn contained_entries(
    table: &'static TokenTable,
    bits: u32,
) -> impl Iterator<Item = &'static TokenEntry> {
    table
        .entries()
        .iter()
        .filter(move |entry| entry.bits != 0 && bits & entry.bits == entry.bits)
}

/// Writes the tokens of `bits` concatenated, in table order.
pub fn write_tokens(f: &mut fmt::Formatter<'_>, table: &'static TokenTable, bits: u32) -> fmt::Result {
    contained_entries(table, bits).try_for_each(|entry| f.write_str(entry.token))
}
