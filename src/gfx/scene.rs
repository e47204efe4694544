use wgpu::Device;

use super::object::Object;

/// A flat list of objects plus the current selection.
///
/// Selection drives the outline pass: the selected object's `selected`
/// flag is the only state the renderer needs to draw its highlight.
pub struct Scene {
    pub objects: Vec<Object>,
    selected: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            selected: None,
        }
    }

    /// Adds an object and returns its index.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Selects the object at `index`, or clears the selection with `None`.
    /// Out-of-range indices clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.objects.len());
        for (i, object) in self.objects.iter_mut().enumerate() {
            object.selected = Some(i) == index;
        }
        self.selected = index;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_object(&self) -> Option<&Object> {
        self.selected.map(|i| &self.objects[i])
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut Object> {
        self.selected.map(|i| &mut self.objects[i])
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{Cube, Pyramid};
    use crate::gfx::object::Model;

    #[test]
    fn test_selection_flags_follow_selected_index() {
        let mut scene = Scene::new();
        scene.add_object(Object::new(Model::Cube(Cube::new())));
        scene.add_object(Object::new(Model::Pyramid(Pyramid::new())));
        scene.select(Some(1));
        assert!(!scene.objects[0].selected);
        assert!(scene.objects[1].selected);
        assert_eq!(scene.selected_object().unwrap().model.name(), "Pyramid");

        scene.select(None);
        assert!(scene.objects.iter().all(|o| !o.selected));
        assert!(scene.selected_object().is_none());
    }

    #[test]
    fn test_out_of_range_selection_clears() {
        let mut scene = Scene::new();
        scene.add_object(Object::new(Model::Cube(Cube::new())));
        scene.select(Some(5));
        assert!(scene.selected_index().is_none());
    }
}
