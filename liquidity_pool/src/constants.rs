// shares are 18-decimal, same precision the vault feeds pools with
pub(crate) const SHARE_DECIMALS: u32 = 18;
