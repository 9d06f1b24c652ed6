use super::{Tick, nice, util};
use fastnum::decimal::D128;

/// Decade exponents `(floor(log10(min)), ceil(log10(max)))` for a positive domain.
fn log_ticks_exponent_range(min: &D128, max: &D128) -> Option<(i32, i32)> {
    let zero = D128::from(0);
    let (lo, hi) = util::sorted_pair(*min, *max);
    if lo <= zero || hi <= zero {
        return None;
    }

    let e_min = util::to_f64(&lo).log10().floor();
    let e_max = util::to_f64(&hi).log10().ceil();
    if !e_min.is_finite() || !e_max.is_finite() {
        return None;
    }

    Some((e_min.clamp(-300.0, 300.0) as i32, e_max.clamp(-300.0, 300.0) as i32))
}

/// Power-of-ten breaks for a log10 axis, with 2× and 5× decade multiples
/// added when fewer than three powers fall inside the domain.
///
/// Bounds are in untransformed (data) space.
///
/// # Examples
///
/// ```
/// use fastnum::decimal::D128;
/// use ggscale::scale::log::log_breaks;
///
/// let breaks = log_breaks(D128::from(1), D128::from(1000), 5);
/// let expected: Vec<D128> = [1i32, 10, 100, 1000].into_iter().map(D128::from).collect();
/// assert_eq!(breaks, expected);
/// ```
pub fn log_breaks(min: D128, max: D128, count: usize) -> Vec<D128> {
    let majors: Vec<D128> = LogTickIter::new(min, max, &[])
        .filter(|tick| tick.level == 0)
        .map(|tick| tick.value)
        .collect();
    if majors.len() >= 3 {
        return majors;
    }

    let mut breaks: Vec<D128> = LogTickIter::new(min, max, &[2, 5])
        .map(|tick| tick.value)
        .collect();
    breaks.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    breaks.dedup();

    if breaks.is_empty() {
        // Domain inside a single decade with no 1/2/5 multiple: plain nice breaks.
        let (lo, hi) = util::sorted_pair(min, max);
        return nice::nice_breaks(lo, hi, count);
    }
    breaks
}

/// Minor log breaks: the 2..9 multiples of every decade inside the domain.
pub fn log_minor_breaks(min: D128, max: D128) -> Vec<D128> {
    LogTickIter::new(min, max, &[2, 3, 4, 5, 6, 7, 8, 9])
        .filter(|tick| tick.level == 1)
        .map(|tick| tick.value)
        .collect()
}

/// Walks decades from `10^floor(log10(min))` to `10^ceil(log10(max))`, yielding
/// each power of ten as a major tick followed by its multiples as minor ticks.
pub struct LogTickIter {
    state: LogTickIterState,
}

enum LogTickIterState {
    Normal(LogNormalState),
    Fallback(FallbackState),
    Done,
}

struct LogNormalState {
    domain_min: D128,
    domain_max: D128,
    exponent: i32,
    exponent_max: i32,
    current_decade: D128,
    multipliers: Vec<D128>,
    multiplier_idx: usize,
    stage: LogStage,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LogStage {
    Major,
    Minor,
}

struct FallbackState {
    first: Option<D128>,
    second: Option<D128>,
}

impl LogTickIter {
    pub fn new(min: D128, max: D128, multipliers: &[i32]) -> Self {
        let (domain_min, domain_max) = util::sorted_pair(min, max);

        if let Some((e_min, e_max)) = log_ticks_exponent_range(&domain_min, &domain_max) {
            Self {
                state: LogTickIterState::Normal(LogNormalState {
                    domain_min,
                    domain_max,
                    exponent: e_min,
                    exponent_max: e_max,
                    current_decade: util::pow10(e_min),
                    multipliers: multipliers.iter().map(|m| D128::from(*m)).collect(),
                    multiplier_idx: 0,
                    stage: LogStage::Major,
                }),
            }
        } else {
            Self {
                state: LogTickIterState::Fallback(FallbackState {
                    first: Some(domain_min),
                    second: (domain_max != domain_min).then_some(domain_max),
                }),
            }
        }
    }
}

impl Iterator for LogTickIter {
    type Item = Tick;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            LogTickIterState::Normal(state) => {
                if let Some(tick) = state.next_tick() {
                    Some(tick)
                } else {
                    self.state = LogTickIterState::Done;
                    None
                }
            }
            LogTickIterState::Fallback(state) => {
                if let Some(value) = state.first.take() {
                    Some(Tick { value, level: 0 })
                } else if let Some(value) = state.second.take() {
                    Some(Tick { value, level: 0 })
                } else {
                    self.state = LogTickIterState::Done;
                    None
                }
            }
            LogTickIterState::Done => None,
        }
    }
}

impl LogNormalState {
    fn contains(&self, value: &D128) -> bool {
        *value >= self.domain_min && *value <= self.domain_max
    }

    fn next_tick(&mut self) -> Option<Tick> {
        loop {
            if self.exponent > self.exponent_max {
                return None;
            }

            match self.stage {
                LogStage::Major => {
                    let value = self.current_decade;
                    if self.multipliers.is_empty() {
                        self.advance_decade();
                    } else {
                        self.stage = LogStage::Minor;
                        self.multiplier_idx = 0;
                    }

                    if self.contains(&value) {
                        return Some(Tick { value, level: 0 });
                    }
                }
                LogStage::Minor => {
                    if self.multiplier_idx >= self.multipliers.len() {
                        self.advance_decade();
                        self.stage = LogStage::Major;
                        continue;
                    }

                    let multiplier = self.multipliers[self.multiplier_idx];
                    self.multiplier_idx += 1;
                    let value = self.current_decade * multiplier;

                    if self.contains(&value) {
                        return Some(Tick { value, level: 1 });
                    }
                }
            }
        }
    }

    fn advance_decade(&mut self) {
        self.exponent += 1;
        self.current_decade = util::pow10(self.exponent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decs(values: &[i64]) -> Vec<D128> {
        values.iter().map(|v| D128::from(*v)).collect()
    }

    #[test]
    fn test_log_breaks_powers_of_ten() {
        assert_eq!(
            log_breaks(D128::from(1), D128::from(1000), 5),
            decs(&[1, 10, 100, 1000])
        );
    }

    #[test]
    fn test_log_breaks_adds_multiples_for_narrow_domain() {
        assert_eq!(
            log_breaks(D128::from(1), D128::from(60), 5),
            decs(&[1, 2, 5, 10, 20, 50])
        );
    }

    #[test]
    fn test_log_breaks_inside_single_decade_falls_back_to_nice() {
        let breaks = log_breaks(util::dec(1.1).unwrap(), util::dec(1.9).unwrap(), 5);
        assert!(!breaks.is_empty());
        for pair in breaks.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_log_breaks_fractional_decades() {
        let breaks = log_breaks(util::dec(0.001).unwrap(), D128::from(1), 5);
        assert_eq!(
            breaks,
            vec![
                util::dec(0.001).unwrap(),
                util::dec(0.01).unwrap(),
                util::dec(0.1).unwrap(),
                D128::from(1)
            ]
        );
    }

    #[test]
    fn test_log_minor_breaks() {
        let minors = log_minor_breaks(D128::from(1), D128::from(100));
        assert_eq!(minors.len(), 16);
        assert_eq!(minors[0], D128::from(2));
        assert_eq!(minors[8], D128::from(20));
    }

    #[test]
    fn test_log_ticks_remain_within_domain() {
        let min = util::dec(1.3).unwrap();
        let max = D128::from(347);
        for tick in LogTickIter::new(min, max, &[2, 3, 4, 5, 6, 7, 8, 9]) {
            assert!(tick.value >= min && tick.value <= max);
        }
    }

    #[test]
    fn test_log_ticks_invalid_domain_falls_back_to_endpoints() {
        let ticks: Vec<_> = LogTickIter::new(D128::from(-1), D128::from(10), &[]).collect();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].value, D128::from(-1));
        assert_eq!(ticks[1].value, D128::from(10));
    }
}
