use soroban_sdk::U256;

pub trait ExtraMath {
    fn sqrt(&self) -> Self;
    fn sqrt_up(&self) -> Self;
}

impl ExtraMath for U256 {
    // floor(sqrt(x))
    fn sqrt(&self) -> U256 {
        // https://github.com/paritytech/parity-common/issues/252
        let e = self.env();
        let zero = U256::from_u32(e, 0);
        if *self == zero {
            return zero;
        }
        let two = U256::from_u32(e, 2);

        let mut z = (self.add(&U256::from_u32(e, 1))).div(&two);

        let mut y = self.clone();

        while z < y {
            y = z.clone();
            z = (self.div(&z).add(&z)).div(&two);
        }

        y
    }

    // ceil(sqrt(x))
    fn sqrt_up(&self) -> U256 {
        let root = self.sqrt();
        if root.mul(&root) < *self {
            root.add(&U256::from_u32(self.env(), 1))
        } else {
            root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_sqrt() {
        let e = Env::default();
        assert_eq!(U256::from_u32(&e, 0).sqrt(), U256::from_u32(&e, 0));
        assert_eq!(U256::from_u32(&e, 16).sqrt(), U256::from_u32(&e, 4));
        assert_eq!(U256::from_u32(&e, 17).sqrt(), U256::from_u32(&e, 4));
        assert_eq!(U256::from_u32(&e, 16).sqrt_up(), U256::from_u32(&e, 4));
        assert_eq!(U256::from_u32(&e, 17).sqrt_up(), U256::from_u32(&e, 5));
    }
}
