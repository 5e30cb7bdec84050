use soroban_sdk::{Address, Env, Map, Vec};

// Per-call scratch state of the batch router.
//
// `tokens_in` / `tokens_out` are insertion ordered sets of tokens the sender pays / receives.
// Amounts accumulate per token while paths run and are turned into transfers on settlement.
// `settled_in` / `settled_out` track what was already moved during the path run itself (pulled
// from or minted to the sender) so that it is reported but not transferred again. They are kept
// apart so a token paid by one path and received from another is reported once on each side.
pub(crate) struct SwapContext {
    tokens_in: Vec<Address>,
    tokens_out: Vec<Address>,
    in_amounts: Map<Address, u128>,
    out_amounts: Map<Address, u128>,
    settled_in: Map<Address, u128>,
    settled_out: Map<Address, u128>,
}

fn add_to(map: &mut Map<Address, u128>, token: &Address, amount: u128) {
    let current = map.get(token.clone()).unwrap_or(0);
    map.set(token.clone(), current + amount);
}

fn sub_from(map: &mut Map<Address, u128>, token: &Address, amount: u128) {
    let current = map.get(token.clone()).unwrap_or(0);
    map.set(token.clone(), current - amount);
}

fn insert(set: &mut Vec<Address>, token: &Address) {
    if !set.contains(token) {
        set.push_back(token.clone());
    }
}

impl SwapContext {
    pub(crate) fn new(e: &Env) -> Self {
        SwapContext {
            tokens_in: Vec::new(e),
            tokens_out: Vec::new(e),
            in_amounts: Map::new(e),
            out_amounts: Map::new(e),
            settled_in: Map::new(e),
            settled_out: Map::new(e),
        }
    }

    pub(crate) fn add_token_in(&mut self, token: &Address) {
        insert(&mut self.tokens_in, token);
    }

    pub(crate) fn add_token_out(&mut self, token: &Address) {
        insert(&mut self.tokens_out, token);
    }

    pub(crate) fn add_in_amount(&mut self, token: &Address, amount: u128) {
        add_to(&mut self.in_amounts, token, amount);
    }

    pub(crate) fn sub_in_amount(&mut self, token: &Address, amount: u128) {
        sub_from(&mut self.in_amounts, token, amount);
    }

    pub(crate) fn add_out_amount(&mut self, token: &Address, amount: u128) {
        add_to(&mut self.out_amounts, token, amount);
    }

    pub(crate) fn sub_out_amount(&mut self, token: &Address, amount: u128) {
        sub_from(&mut self.out_amounts, token, amount);
    }

    pub(crate) fn add_settled_in(&mut self, token: &Address, amount: u128) {
        add_to(&mut self.settled_in, token, amount);
    }

    pub(crate) fn add_settled_out(&mut self, token: &Address, amount: u128) {
        add_to(&mut self.settled_out, token, amount);
    }

    pub(crate) fn in_amount(&self, token: &Address) -> u128 {
        self.in_amounts.get(token.clone()).unwrap_or(0)
    }

    pub(crate) fn out_amount(&self, token: &Address) -> u128 {
        self.out_amounts.get(token.clone()).unwrap_or(0)
    }

    fn settled_in(&self, token: &Address) -> u128 {
        self.settled_in.get(token.clone()).unwrap_or(0)
    }

    fn settled_out(&self, token: &Address) -> u128 {
        self.settled_out.get(token.clone()).unwrap_or(0)
    }

    pub(crate) fn tokens_in(&self) -> Vec<Address> {
        self.tokens_in.clone()
    }

    pub(crate) fn tokens_out(&self) -> Vec<Address> {
        self.tokens_out.clone()
    }

    // gross amounts paid per token in, including what was settled during the run
    pub(crate) fn amounts_in(&self, e: &Env) -> Vec<u128> {
        let mut amounts = Vec::new(e);
        for token in self.tokens_in.iter() {
            amounts.push_back(self.in_amount(&token) + self.settled_in(&token));
        }
        amounts
    }

    // gross amounts received per token out, including what was settled during the run
    pub(crate) fn amounts_out(&self, e: &Env) -> Vec<u128> {
        let mut amounts = Vec::new(e);
        for token in self.tokens_out.iter() {
            amounts.push_back(self.out_amount(&token) + self.settled_out(&token));
        }
        amounts
    }

    // A token both paid and received only needs its net amount moved.
    pub(crate) fn net_opposing_flows(&mut self) {
        for token in self.tokens_in.iter() {
            let amount_in = self.in_amount(&token);
            let amount_out = self.out_amount(&token);
            let netted = amount_in.min(amount_out);
            if netted > 0 {
                self.sub_in_amount(&token, netted);
                self.sub_out_amount(&token, netted);
            }
        }
    }

    pub(crate) fn pop_token_in(&mut self) -> Option<(Address, u128)> {
        let token = self.tokens_in.pop_back()?;
        let amount = self.in_amount(&token);
        self.in_amounts.remove(token.clone());
        Some((token, amount))
    }

    pub(crate) fn pop_token_out(&mut self) -> Option<(Address, u128)> {
        let token = self.tokens_out.pop_back()?;
        let amount = self.out_amount(&token);
        self.out_amounts.remove(token.clone());
        Some((token, amount))
    }

    pub(crate) fn clear_settled(&mut self) {
        self.settled_in = Map::new(self.settled_in.env());
        self.settled_out = Map::new(self.settled_out.env());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_token_sets_keep_insertion_order() {
        let e = Env::default();
        let (a, b) = (Address::generate(&e), Address::generate(&e));
        let mut ctx = SwapContext::new(&e);
        ctx.add_token_in(&b);
        ctx.add_token_in(&a);
        ctx.add_token_in(&b);
        assert_eq!(ctx.tokens_in(), Vec::from_array(&e, [b.clone(), a.clone()]));
        assert_eq!(ctx.pop_token_in(), Some((a, 0)));
        assert_eq!(ctx.pop_token_in(), Some((b, 0)));
        assert_eq!(ctx.pop_token_in(), None);
    }

    #[test]
    fn test_net_opposing_flows() {
        let e = Env::default();
        let (a, b) = (Address::generate(&e), Address::generate(&e));
        let mut ctx = SwapContext::new(&e);
        ctx.add_token_in(&a);
        ctx.add_in_amount(&a, 100);
        ctx.add_token_out(&a);
        ctx.add_out_amount(&a, 30);
        ctx.add_token_out(&b);
        ctx.add_out_amount(&b, 50);

        // reported amounts stay gross
        assert_eq!(ctx.amounts_in(&e), Vec::from_array(&e, [100u128]));
        ctx.net_opposing_flows();
        assert_eq!(ctx.in_amount(&a), 70);
        assert_eq!(ctx.out_amount(&a), 0);
        assert_eq!(ctx.out_amount(&b), 50);
    }

    #[test]
    fn test_settled_amounts_are_reported() {
        let e = Env::default();
        let a = Address::generate(&e);
        let mut ctx = SwapContext::new(&e);
        ctx.add_token_out(&a);
        ctx.add_out_amount(&a, 5);
        ctx.add_settled_out(&a, 7);
        assert_eq!(ctx.amounts_out(&e), Vec::from_array(&e, [12u128]));
        ctx.clear_settled();
        assert_eq!(ctx.amounts_out(&e), Vec::from_array(&e, [5u128]));
    }

    #[test]
    fn test_settled_sides_are_reported_separately() {
        let e = Env::default();
        let a = Address::generate(&e);
        let mut ctx = SwapContext::new(&e);
        // paid in full during one path, received from another
        ctx.add_token_in(&a);
        ctx.add_settled_in(&a, 40);
        ctx.add_token_out(&a);
        ctx.add_out_amount(&a, 25);

        assert_eq!(ctx.amounts_in(&e), Vec::from_array(&e, [40u128]));
        assert_eq!(ctx.amounts_out(&e), Vec::from_array(&e, [25u128]));
    }
}
