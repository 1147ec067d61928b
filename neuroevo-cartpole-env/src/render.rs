//! Text rendering of the cart on its track.
use crate::base::X_THRESHOLD;

const TRACK_WIDTH: usize = 41;

/// One line picture of the track: the cart as a pole glyph, the track edges as `|`.
pub(crate) fn track(x: f32, theta: f32) -> String {
    let pos = ((x + X_THRESHOLD) / (2.0 * X_THRESHOLD) * (TRACK_WIDTH - 1) as f32).round();
    let pos = pos.max(0.0).min((TRACK_WIDTH - 1) as f32) as usize;
    let pole = if theta > 0.05 {
        '/'
    } else if theta < -0.05 {
        '\\'
    } else {
        '|'
    };

    let mut line = String::with_capacity(TRACK_WIDTH + 2);
    line.push('|');
    line.extend((0..TRACK_WIDTH).map(|i| if i == pos { pole } else { '_' }));
    line.push('|');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track() {
        assert_eq!(track(0.0, 0.0).len(), TRACK_WIDTH + 2);
        assert_eq!(track(0.0, 0.0).chars().nth(TRACK_WIDTH / 2 + 1), Some('|'));
        assert_eq!(track(-10.0, 0.1).chars().nth(1), Some('/'));
        assert_eq!(track(10.0, -0.1).chars().nth(TRACK_WIDTH), Some('\\'));
    }
}
