/// Unsigned accumulator type for native-currency and token amounts.
///
/// Wide enough that honest donation flows never approach the representable
/// range; additions on ledger accumulators are still checked, and overflow
/// aborts the whole operation.
pub type Amount = u128;

/// Base units per whole native coin (18 decimal places).
pub const UNIT: Amount = 1_000_000_000_000_000_000;

/// Convert a whole-coin count into base units.
pub const fn units(whole: u64) -> Amount {
    whole as Amount * UNIT
}

/// Render an amount in base units as a whole-coin decimal string.
///
/// Trailing fractional zeros are trimmed: `1.5`, not `1.500000000000000000`.
pub fn format_units(amount: Amount) -> String {
    let whole = amount / UNIT;
    let frac = amount % UNIT;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:018}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
