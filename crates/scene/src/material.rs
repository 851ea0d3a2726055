use facehover_common::Color;

/// Ordered color slots, one per face group, addressed by material index.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSlots {
    colors: Vec<Color>,
}

impl MaterialSlots {
    /// `count` slots all set to `color`.
    pub fn uniform(count: usize, color: Color) -> Self {
        Self {
            colors: vec![color; count],
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Overwrite a slot in place. Returns false if the slot does not exist.
    pub fn set(&mut self, index: usize, color: Color) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }

    /// Indices of the slots whose color is not `color`.
    pub fn differing_from(&self, color: Color) -> Vec<usize> {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != color)
            .map(|(i, _)| i)
            .collect()
    }
}
