// 18-decimal fixed point helpers. All amounts handed to pools are scaled to this precision.
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_DECIMALS: u32 = 18;

pub fn mul_down(e: &Env, a: u128, b: u128) -> u128 {
    a.fixed_mul_floor(e, &b, &WAD)
}

pub fn mul_up(e: &Env, a: u128, b: u128) -> u128 {
    a.fixed_mul_ceil(e, &b, &WAD)
}

pub fn div_down(e: &Env, a: u128, b: u128) -> u128 {
    a.fixed_mul_floor(e, &WAD, &b)
}

pub fn div_up(e: &Env, a: u128, b: u128) -> u128 {
    a.fixed_mul_ceil(e, &WAD, &b)
}

pub fn mul_div_down(e: &Env, a: u128, b: u128, c: u128) -> u128 {
    a.fixed_mul_floor(e, &b, &c)
}

pub fn mul_div_up(e: &Env, a: u128, b: u128, c: u128) -> u128 {
    a.fixed_mul_ceil(e, &b, &c)
}

// 1 - x, saturating at zero
pub fn complement(x: u128) -> u128 {
    if x < WAD {
        WAD - x
    } else {
        0
    }
}

pub fn scaling_factor(decimals: u32) -> u128 {
    10u128.pow(WAD_DECIMALS - decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_direction() {
        let e = Env::default();
        assert_eq!(mul_down(&e, 1, WAD / 3), 0);
        assert_eq!(mul_up(&e, 1, WAD / 3), 1);
        assert_eq!(div_down(&e, 1, 3 * WAD), 0);
        assert_eq!(div_up(&e, 1, 3 * WAD), 1);
        assert_eq!(mul_div_down(&e, 10, 10, 3), 33);
        assert_eq!(mul_div_up(&e, 10, 10, 3), 34);
    }

    #[test]
    fn test_complement() {
        assert_eq!(complement(WAD / 4), WAD * 3 / 4);
        assert_eq!(complement(WAD), 0);
        assert_eq!(complement(WAD + 1), 0);
    }

    #[test]
    fn test_scaling_factor() {
        assert_eq!(scaling_factor(7), 100_000_000_000);
        assert_eq!(scaling_factor(18), 1);
    }
}
