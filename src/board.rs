//! A board of drawing slots, each holding at most one recognised shape.

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{BoardError, Result};
use crate::math::Point2;
use crate::recognition::{Criteria, RecognizeStroke};
use crate::shape::{Shape, ShapeGeometry};
use crate::stroke::StrokeParams;

slotmap::new_key_type! {
    /// Unique identifier for a slot on a [`ShapeBoard`].
    pub struct SlotId;
}

/// Size of the drawing surface shapes are expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    width: f64,
    height: f64,
}

impl SurfaceSize {
    /// Creates a new surface size.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::InvalidSurface` for negative or non-finite sizes.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(BoardError::InvalidSurface(format!("{width}x{height}")).into());
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns whether either side is zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Owns the shapes of every drawing slot and keeps them in surface coordinates.
#[derive(Debug, Default)]
pub struct ShapeBoard {
    slots: SlotMap<SlotId, Option<Shape>>,
    criteria: Criteria,
    params: StrokeParams,
    surface: Option<SurfaceSize>,
}

impl ShapeBoard {
    /// Creates a new, empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the thresholds used when recording strokes.
    #[must_use]
    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Sets the preprocessing used when recording strokes.
    #[must_use]
    pub fn with_stroke_params(mut self, params: StrokeParams) -> Self {
        self.params = params;
        self
    }

    /// Adds an empty slot and returns its ID.
    pub fn add_slot(&mut self) -> SlotId {
        self.slots.insert(None)
    }

    /// Removes a slot, returning its shape.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::SlotNotFound` if the slot does not exist.
    pub fn remove_slot(&mut self, id: SlotId) -> Result<Option<Shape>> {
        let slot = self.slots.remove(id).ok_or(BoardError::SlotNotFound)?;
        Ok(slot)
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over the slot IDs.
    pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.keys()
    }

    /// Returns the shape in a slot, if any.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::SlotNotFound` if the slot does not exist.
    pub fn shape(&self, id: SlotId) -> Result<Option<&Shape>> {
        let slot = self.slots.get(id).ok_or(BoardError::SlotNotFound)?;
        Ok(slot.as_ref())
    }

    /// Returns a mutable reference to the shape in a slot, if any.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::SlotNotFound` if the slot does not exist.
    pub fn shape_mut(&mut self, id: SlotId) -> Result<Option<&mut Shape>> {
        let slot = self.slots.get_mut(id).ok_or(BoardError::SlotNotFound)?;
        Ok(slot.as_mut())
    }

    /// Stores `shape` in a slot, returning the shape it replaced.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::SlotNotFound` if the slot does not exist.
    pub fn set_shape(&mut self, id: SlotId, shape: Shape) -> Result<Option<Shape>> {
        let slot = self.slots.get_mut(id).ok_or(BoardError::SlotNotFound)?;
        Ok(slot.replace(shape))
    }

    /// Empties a slot, returning its shape.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::SlotNotFound` if the slot does not exist.
    pub fn clear(&mut self, id: SlotId) -> Result<Option<Shape>> {
        let slot = self.slots.get_mut(id).ok_or(BoardError::SlotNotFound)?;
        Ok(slot.take())
    }

    /// Recognises a finished stroke and stores the result in a slot.
    ///
    /// The slot keeps its previous shape if recognition fails.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::SlotNotFound` if the slot does not exist, or the
    /// error from [`RecognizeStroke::execute`].
    pub fn record_stroke(&mut self, id: SlotId, points: Vec<Point2>) -> Result<&Shape> {
        if !self.slots.contains_key(id) {
            return Err(BoardError::SlotNotFound.into());
        }
        let shape = RecognizeStroke::new(points)
            .with_criteria(self.criteria)
            .with_params(self.params)
            .execute()?;
        debug!(identity = %shape.identity(), "recorded stroke");

        let slot = self.slots.get_mut(id).ok_or(BoardError::SlotNotFound)?;
        Ok(slot.insert(shape))
    }

    /// Returns the last surface size seen by [`resize_surface`](Self::resize_surface).
    #[must_use]
    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    /// Moves every shape onto a resized surface.
    ///
    /// The first call only records the size. Empty sizes are ignored, so a
    /// surface that is briefly collapsed does not squash the shapes.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::InvalidSurface` for negative or non-finite sizes.
    pub fn resize_surface(&mut self, width: f64, height: f64) -> Result<()> {
        let new = SurfaceSize::new(width, height)?;
        if new.is_empty() {
            debug!(width, height, "ignoring empty surface");
            return Ok(());
        }
        if let Some(old) = self.surface {
            for shape in self.slots.values_mut().flatten() {
                shape.rescale(old.width, old.height, new.width, new.height)?;
            }
        }
        self.surface = Some(new);
        Ok(())
    }
}
