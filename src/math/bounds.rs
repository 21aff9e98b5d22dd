//! Axis-aligned bounding boxes.

use nalgebra::Vector3;

/// An axis-aligned box. The empty box has inverted bounds so that
/// [`Aabb::extend`] behaves as a plain component-wise union.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Aabb {
        Aabb { min, max }
    }

    /// The box containing nothing.
    pub fn empty() -> Aabb {
        Aabb {
            min: Vector3::from_element(f64::INFINITY),
            max: Vector3::from_element(f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Smallest box containing all `points`.
    pub fn from_points<I>(points: I) -> Aabb
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        points.into_iter().fold(Aabb::empty(), |b, p| Aabb {
            min: b.min.inf(&p),
            max: b.max.sup(&p),
        })
    }

    /// A point positioned fractionally within the box; `(0.5, 0.5, 0.5)`
    /// is the center.
    pub fn anchor(&self, anchor: Vector3<f64>) -> Vector3<f64> {
        self.min + self.size().component_mul(&anchor)
    }

    pub fn center(&self) -> Vector3<f64> {
        self.anchor(Vector3::new(0.5, 0.5, 0.5))
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Union of two boxes.
    pub fn extend(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    pub fn contains(&self, p: &Vector3<f64>) -> bool {
        self.min.x <= p.x
            && self.max.x >= p.x
            && self.min.y <= p.y
            && self.max.y >= p.y
            && self.min.z <= p.z
            && self.max.z >= p.z
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.min.x > other.max.x
            || self.max.x < other.min.x
            || self.min.y > other.max.y
            || self.max.y < other.min.y
            || self.min.z > other.max.z
            || self.max.z < other.min.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_extends_to_other() {
        let b = Aabb::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(Aabb::empty().extend(&b), b);
        assert_eq!(b.extend(&Aabb::empty()), b);
        assert!(Aabb::empty().is_empty());
        assert!(!b.is_empty());
    }

    #[test]
    fn from_points_is_tight() {
        let b = Aabb::from_points([
            Vector3::new(1.0, -2.0, 0.0),
            Vector3::new(-3.0, 4.0, 2.0),
            Vector3::new(0.0, 0.0, -1.0),
        ]);
        assert_eq!(b.min, Vector3::new(-3.0, -2.0, -1.0));
        assert_eq!(b.max, Vector3::new(1.0, 4.0, 2.0));
        assert_eq!(b.center(), Vector3::new(-1.0, 1.0, 0.5));
    }

    #[test]
    fn contains_and_intersects() {
        let a = Aabb::new(Vector3::zeros(), Vector3::new(2.0, 2.0, 2.0));
        let b = Aabb::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(3.0, 3.0, 3.0));
        let c = Aabb::new(Vector3::new(5.0, 5.0, 5.0), Vector3::new(6.0, 6.0, 6.0));
        assert!(a.contains(&Vector3::new(1.0, 1.0, 1.0)));
        assert!(!a.contains(&Vector3::new(2.1, 1.0, 1.0)));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
