//! # Library-Internal Utilities

/// Computes the number of digits needed to represent a number in a given base
#[must_use]
pub(crate) fn digits(mut number: usize, mut basis: u8) -> u32 {
    debug_assert!(basis >= 2);
    if number == 0 {
        return 1;
    }
    let mut digits = 0;
    if basis.is_power_of_two() {
        // optimized version using shift operations
        let mut pow: u8 = 0;
        basis >>= 1;
        while basis > 0 {
            pow += 1;
            basis >>= 1;
        }
        while number > 0 {
            digits += 1;
            number >>= pow;
        }
    } else {
        while number > 0 {
            digits += 1;
            number /= basis as usize;
        }
    }
    digits
}

/// Computes `ceil(sqrt(number))` without going through floating point
#[must_use]
pub(crate) fn ceil_sqrt(number: usize) -> usize {
    let mut root = 0;
    while root * root < number {
        root += 1;
    }
    root
}
