/// Result of diffing one channel's live values against its last transmitted
/// baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelDiff<const N: usize> {
    pub changed: [bool; N],
    pub any_changed: bool,
}

/// Pure per-channel differ. Does not touch the baseline; whether and when
/// the baseline advances is the codec's decision, because it must only move
/// when a message is actually going out.
pub fn diff_states<const N: usize>(current: &[u8; N], last_known: &[u8; N]) -> ChannelDiff<N> {
    let mut changed = [false; N];
    let mut any_changed = false;

    for i in 0..N {
        if current[i] != last_known[i] {
            changed[i] = true;
            any_changed = true;
        }
    }

    ChannelDiff {
        changed,
        any_changed,
    }
}
