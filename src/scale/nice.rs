use super::{Tick, util};
use fastnum::decimal::D128;

/// Rounds a raw spacing to 1, 2, 5 or 10 times a power of ten.
///
/// The magnitude `10^floor(log10(raw))` is found by repeated scaling so the
/// result stays an exact decimal. The fraction `raw / magnitude` is then
/// rounded with the classic table: `< 1.5 → 1`, `< 3 → 2`, `< 7 → 5`, else `10`.
///
/// # Examples
///
/// ```
/// use fastnum::decimal::D128;
/// use ggscale::scale::nice::nice_step;
///
/// assert_eq!(nice_step(D128::from(17)), D128::from(20));
/// assert_eq!(nice_step(D128::from(110)), D128::from(100));
/// assert_eq!(nice_step(D128::from(6)), D128::from(5));
/// ```
pub fn nice_step(raw_step: D128) -> D128 {
    let zero = D128::from(0);
    let two = D128::from(2);
    let ten = D128::from(10);

    let abs_step = util::abs(raw_step);
    if abs_step == zero {
        return zero;
    }

    let mut magnitude = D128::from(1);
    let mut guard = 0;
    while magnitude * ten <= abs_step && guard < 400 {
        magnitude = magnitude * ten;
        guard += 1;
    }
    while magnitude > abs_step && guard < 800 {
        magnitude = magnitude / ten;
        guard += 1;
    }

    // Compare doubled fractions so the thresholds 1.5, 3 and 7 stay integral.
    let doubled = abs_step / magnitude * two;
    let factor = if doubled < D128::from(3) {
        1
    } else if doubled < D128::from(6) {
        2
    } else if doubled < D128::from(14) {
        5
    } else {
        10
    };
    magnitude * D128::from(factor)
}

/// Nice major breaks covering `[min, max]` aiming for `count` values.
///
/// # Examples
///
/// ```
/// use fastnum::decimal::D128;
/// use ggscale::scale::nice::nice_breaks;
///
/// let breaks = nice_breaks(D128::from(0), D128::from(100), 7);
/// let expected: Vec<D128> = [0i32, 20, 40, 60, 80, 100].into_iter().map(D128::from).collect();
/// assert_eq!(breaks, expected);
/// ```
pub fn nice_breaks(min: D128, max: D128, count: usize) -> Vec<D128> {
    NiceTickIter::new(min, max, count)
        .filter(|tick| tick.level == 0)
        .map(|tick| tick.value)
        .collect()
}

/// Midpoints between consecutive major breaks that fall inside `[min, max]`.
pub fn nice_minor_breaks(min: D128, max: D128, count: usize) -> Vec<D128> {
    NiceTickIter::new(min, max, count)
        .filter(|tick| tick.level == 1)
        .map(|tick| tick.value)
        .collect()
}

const MAX_TICKS: usize = 10_000;

/// Iterator over major (level 0) and minor (level 1) nice ticks.
///
/// Minor ticks sit halfway between majors. Values are computed from the sweep
/// index rather than accumulated, so long sweeps do not drift.
pub struct NiceTickIter {
    state: NiceTickState,
    remaining: usize,
}

enum NiceTickState {
    Single(Option<D128>),
    Sweep(SweepState),
    Done,
}

struct SweepState {
    start: D128,
    end: D128,
    minor_step: D128,
    lower_tol: D128,
    upper_tol: D128,
    current_index: i64,
}

impl NiceTickIter {
    pub fn new(min: D128, max: D128, count: usize) -> Self {
        if min == max {
            return Self {
                state: NiceTickState::Single(Some(min)),
                remaining: 1,
            };
        }

        let (lo, hi) = util::sorted_pair(min, max);
        let intervals = count.max(2) - 1;
        let raw_step = (hi - lo) / util::dec_int(intervals as i64);
        let step = nice_step(raw_step);
        if step == D128::from(0) {
            return Self {
                state: NiceTickState::Single(Some(lo)),
                remaining: 1,
            };
        }

        let nice_min = util::floor(lo / step) * step;
        let nice_max = util::ceil(hi / step) * step;
        let tolerance = util::epsilon_from_step(&step);

        Self {
            state: NiceTickState::Sweep(SweepState {
                start: nice_min,
                end: nice_max,
                minor_step: step / D128::from(2),
                lower_tol: lo - tolerance,
                upper_tol: hi + tolerance,
                current_index: 0,
            }),
            remaining: MAX_TICKS,
        }
    }
}

impl Iterator for NiceTickIter {
    type Item = Tick;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            NiceTickState::Single(slot) => slot.take().map(|value| Tick { value, level: 0 }),
            NiceTickState::Sweep(state) => {
                while self.remaining > 0 {
                    let value = state.start + state.minor_step * util::dec_int(state.current_index);
                    if value > state.end || value > state.upper_tol {
                        self.state = NiceTickState::Done;
                        return None;
                    }

                    self.remaining -= 1;
                    let index = state.current_index;
                    state.current_index += 1;

                    if value < state.lower_tol {
                        continue;
                    }

                    let level = if index % 2 == 0 { 0 } else { 1 };
                    return Some(Tick { value, level });
                }

                self.state = NiceTickState::Done;
                None
            }
            NiceTickState::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decs(values: &[i64]) -> Vec<D128> {
        values.iter().map(|v| D128::from(*v)).collect()
    }

    #[test]
    fn test_nice_step_table() {
        assert_eq!(nice_step(D128::from(1)), D128::from(1));
        assert_eq!(nice_step(util::dec(1.4).unwrap()), D128::from(1));
        assert_eq!(nice_step(util::dec(1.5).unwrap()), D128::from(2));
        assert_eq!(nice_step(util::dec(2.75).unwrap()), D128::from(2));
        assert_eq!(nice_step(D128::from(3)), D128::from(5));
        assert_eq!(nice_step(util::dec(6.9).unwrap()), D128::from(5));
        assert_eq!(nice_step(D128::from(7)), D128::from(10));
        assert_eq!(nice_step(util::dec(0.0031).unwrap()), util::dec(0.005).unwrap());
    }

    #[test]
    fn test_nice_breaks_zero_to_hundred() {
        assert_eq!(
            nice_breaks(D128::from(0), D128::from(100), 7),
            decs(&[0, 20, 40, 60, 80, 100])
        );
    }

    #[test]
    fn test_nice_breaks_padded_domain() {
        // [0, 100] padded by 5% on each side.
        assert_eq!(
            nice_breaks(D128::from(-5), D128::from(105), 5),
            decs(&[0, 20, 40, 60, 80, 100])
        );
    }

    #[test]
    fn test_nice_breaks_sorted_and_within_tolerance() {
        let min = util::dec(13.2).unwrap();
        let max = util::dec(47.8).unwrap();
        let breaks = nice_breaks(min, max, 5);
        assert!(!breaks.is_empty());
        for pair in breaks.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for value in &breaks {
            assert!(*value >= min && *value <= max);
        }
    }

    #[test]
    fn test_nice_breaks_deterministic() {
        let a = nice_breaks(util::dec(-3.7).unwrap(), util::dec(12.1).unwrap(), 5);
        let b = nice_breaks(util::dec(-3.7).unwrap(), util::dec(12.1).unwrap(), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_nice_breaks_degenerate_domain() {
        assert_eq!(nice_breaks(D128::from(5), D128::from(5), 5), decs(&[5]));
    }

    #[test]
    fn test_nice_breaks_reversed_input() {
        assert_eq!(
            nice_breaks(D128::from(100), D128::from(0), 7),
            decs(&[0, 20, 40, 60, 80, 100])
        );
    }

    #[test]
    fn test_nice_minor_breaks_are_midpoints() {
        assert_eq!(
            nice_minor_breaks(D128::from(0), D128::from(100), 6),
            decs(&[10, 30, 50, 70, 90])
        );
    }

    #[test]
    fn test_small_spacing_has_no_float_drift() {
        let breaks = nice_breaks(D128::from(0), util::dec(0.7).unwrap(), 8);
        assert_eq!(breaks[1], util::dec(0.1).unwrap());
        assert_eq!(breaks[7], util::dec(0.7).unwrap());
    }
}
