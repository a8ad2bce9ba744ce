use crate::*;
use rand::Rng;

pub trait Policy {
    /// `None` when the policy is undefined at `s`, e.g. the goal or an obstacle.
    fn policy(&mut self, s: &State) -> Option<Action>;
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn policy(&mut self, s: &State) -> Option<Action> {
        (**self).policy(s)
    }
}

/// Picks one of the four actions uniformly, ignoring the state.
pub struct RandomPolicy<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandomPolicy<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> Policy for RandomPolicy<'_, R> {
    fn policy(&mut self, _s: &State) -> Option<Action> {
        Action::from_index(self.rng.gen_range(0..Action::ALL.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;
    use rand::prelude::*;

    #[test]
    fn random_policy_is_uniform() {
        let rng = &mut StdRng::seed_from_u64(2718);
        let mut policy = RandomPolicy::new(rng);

        let n = 40000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            let a = policy.policy(&START).unwrap();
            counts[a.index()] += 1;
        }

        for c in counts {
            assert_float_eq!(c as f64 / n as f64, 0.25, abs <= 2e-2);
        }
    }

    #[test]
    fn random_policy_is_reproducible_under_seed() {
        let draw = |seed| {
            let rng = &mut StdRng::seed_from_u64(seed);
            let mut policy = RandomPolicy::new(rng);
            (0..32)
                .map(|_| policy.policy(&START).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(draw(42), draw(42));
    }
}
