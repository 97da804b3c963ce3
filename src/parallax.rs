use std::fmt;

/// A CSS `translate(x, y)` in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

impl Translate {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn inverted(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({}px, {}px)", self.x + 0.0, self.y + 0.0)
    }
}

/// Offsets for the front and back layers given a pointer position inside the
/// hover region. The back layer always moves opposite to the front one.
pub fn parallax_offsets(
    offset_x: f64,
    offset_y: f64,
    width: f64,
    height: f64,
    strength: f64,
) -> (Translate, Translate) {
    if width <= 0.0 || height <= 0.0 {
        return (Translate::ORIGIN, Translate::ORIGIN);
    }

    let front = Translate {
        x: (offset_x / width - 0.5) * strength,
        y: (offset_y / height - 0.5) * strength,
    };
    (front, front.inverted())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRENGTH: f64 = 20.0;

    #[test]
    fn centered_pointer_leaves_layers_in_place() {
        let (front, back) = parallax_offsets(150.0, 100.0, 300.0, 200.0, STRENGTH);
        assert_eq!(front, Translate::ORIGIN);
        assert_eq!(back, Translate::ORIGIN);
        assert_eq!(front.to_string(), "translate(0px, 0px)");
        assert_eq!(back.to_string(), "translate(0px, 0px)");
    }

    #[test]
    fn right_edge_is_full_travel() {
        let (front, back) = parallax_offsets(300.0, 100.0, 300.0, 200.0, STRENGTH);
        assert_eq!(front.x, 10.0);
        assert_eq!(back.x, -10.0);
    }

    #[test]
    fn top_left_corner_moves_layers_apart() {
        let (front, back) = parallax_offsets(0.0, 0.0, 300.0, 200.0, STRENGTH);
        assert_eq!(front, Translate { x: -10.0, y: -10.0 });
        assert_eq!(back.to_string(), "translate(10px, 10px)");
    }

    #[test]
    fn collapsed_region_does_not_produce_nan() {
        let (front, back) = parallax_offsets(10.0, 10.0, 0.0, 200.0, STRENGTH);
        assert_eq!(front, Translate::ORIGIN);
        assert_eq!(back, Translate::ORIGIN);
    }
}
