use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::domain::DomainValue;
use crate::core::types::Color;

/// Accessor with a base function plus named, removable decoration layers.
///
/// Behaviors decorate series attributes (color, stroke width) by installing a
/// layer keyed by their role. Installing under an existing role replaces that
/// layer in place, so repeated postprocess passes never compound decorations;
/// removing the role restores the prior composition exactly.
#[derive(Clone)]
pub struct AccessorStack<T: Clone + 'static> {
    base: Rc<dyn Fn(usize) -> T>,
    layers: IndexMap<String, Rc<dyn Fn(usize, T) -> T>>,
}

impl<T: Clone + 'static> AccessorStack<T> {
    pub fn new(base: impl Fn(usize) -> T + 'static) -> Self {
        Self {
            base: Rc::new(base),
            layers: IndexMap::new(),
        }
    }

    /// Resolves the value at `index` by folding every layer over the base
    /// accessor, in layer insertion order.
    #[must_use]
    pub fn resolve(&self, index: usize) -> T {
        let mut value = (self.base)(index);
        for layer in self.layers.values() {
            value = layer(index, value);
        }
        value
    }

    /// Installs or replaces the layer owned by `role`.
    pub fn set_layer(&mut self, role: &str, layer: impl Fn(usize, T) -> T + 'static) {
        self.layers.insert(role.to_owned(), Rc::new(layer));
    }

    /// Removes the layer owned by `role`. Returns whether a layer existed.
    pub fn remove_layer(&mut self, role: &str) -> bool {
        self.layers.shift_remove(role).is_some()
    }

    #[must_use]
    pub fn has_layer(&self, role: &str) -> bool {
        self.layers.contains_key(role)
    }
}

/// Weak identification of a single data point: series id plus datum index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesDatum {
    pub series_id: String,
    pub index: usize,
}

impl SeriesDatum {
    #[must_use]
    pub fn new(series_id: impl Into<String>, index: usize) -> Self {
        Self {
            series_id: series_id.into(),
            index,
        }
    }
}

/// Nearest-lookup result record for one candidate datum.
#[derive(Debug, Clone, PartialEq)]
pub struct DatumDetails<D: DomainValue> {
    pub series_id: String,
    pub index: usize,
    pub domain: D,
    pub measure: Option<f64>,
    /// Pixel distance along the domain axis used for sorting and thresholds.
    pub domain_distance: f64,
    pub overlay: bool,
}

impl<D: DomainValue> DatumDetails<D> {
    #[must_use]
    pub fn datum(&self) -> SeriesDatum {
        SeriesDatum::new(self.series_id.clone(), self.index)
    }
}

/// One data series: an ordered list of data items exposed through accessor
/// functions.
///
/// The chart host replaces series wholesale on each data push; behaviors may
/// decorate the color and stroke accessors in between, but never mutate the
/// underlying data.
#[derive(Clone)]
pub struct Series<D: DomainValue> {
    id: String,
    category: Option<String>,
    overlay: bool,
    len: usize,
    domain_fn: Rc<dyn Fn(usize) -> D>,
    domain_lower_fn: Option<Rc<dyn Fn(usize) -> Option<D>>>,
    domain_upper_fn: Option<Rc<dyn Fn(usize) -> Option<D>>>,
    measure_fn: Rc<dyn Fn(usize) -> Option<f64>>,
    measure_lower_fn: Option<Rc<dyn Fn(usize) -> Option<f64>>>,
    measure_upper_fn: Option<Rc<dyn Fn(usize) -> Option<f64>>>,
    color: AccessorStack<Color>,
    fill_color: AccessorStack<Color>,
    stroke_width: AccessorStack<f64>,
    custom_stroke: bool,
}

impl<D: DomainValue> Series<D> {
    /// Starts building a series over a typed data vector.
    pub fn builder<T: 'static>(
        id: impl Into<String>,
        data: Vec<T>,
        domain: impl Fn(&T) -> D + 'static,
    ) -> SeriesBuilder<T, D> {
        SeriesBuilder::new(id.into(), data, domain)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Overlay series are supplemental and excluded from selection expansion.
    #[must_use]
    pub fn overlay(&self) -> bool {
        self.overlay
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn domain(&self, index: usize) -> D {
        (self.domain_fn)(index)
    }

    #[must_use]
    pub fn domain_lower(&self, index: usize) -> Option<D> {
        self.domain_lower_fn.as_ref().and_then(|f| f(index))
    }

    #[must_use]
    pub fn domain_upper(&self, index: usize) -> Option<D> {
        self.domain_upper_fn.as_ref().and_then(|f| f(index))
    }

    #[must_use]
    pub fn measure(&self, index: usize) -> Option<f64> {
        (self.measure_fn)(index)
    }

    #[must_use]
    pub fn measure_lower(&self, index: usize) -> Option<f64> {
        self.measure_lower_fn.as_ref().and_then(|f| f(index))
    }

    #[must_use]
    pub fn measure_upper(&self, index: usize) -> Option<f64> {
        self.measure_upper_fn.as_ref().and_then(|f| f(index))
    }

    /// Effective draw color at `index`, after behavior decorations.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.color.resolve(index)
    }

    /// Effective fill color at `index`, after behavior decorations.
    #[must_use]
    pub fn fill_color(&self, index: usize) -> Color {
        self.fill_color.resolve(index)
    }

    /// Effective stroke width at `index`, after behavior decorations.
    #[must_use]
    pub fn stroke_width(&self, index: usize) -> f64 {
        self.stroke_width.resolve(index)
    }

    /// Whether the series was built with its own stroke-width accessor.
    #[must_use]
    pub fn has_custom_stroke(&self) -> bool {
        self.custom_stroke
    }

    pub fn color_stack_mut(&mut self) -> &mut AccessorStack<Color> {
        &mut self.color
    }

    pub fn fill_color_stack_mut(&mut self) -> &mut AccessorStack<Color> {
        &mut self.fill_color
    }

    pub fn stroke_width_stack_mut(&mut self) -> &mut AccessorStack<f64> {
        &mut self.stroke_width
    }
}

/// Typed builder collecting accessors over `T` before erasing them into a
/// `Series<D>`.
pub struct SeriesBuilder<T: 'static, D: DomainValue> {
    id: String,
    data: Rc<Vec<T>>,
    domain: Rc<dyn Fn(&T) -> D>,
    domain_lower: Option<Rc<dyn Fn(&T) -> Option<D>>>,
    domain_upper: Option<Rc<dyn Fn(&T) -> Option<D>>>,
    measure: Option<Rc<dyn Fn(&T) -> Option<f64>>>,
    measure_lower: Option<Rc<dyn Fn(&T) -> Option<f64>>>,
    measure_upper: Option<Rc<dyn Fn(&T) -> Option<f64>>>,
    color: Option<Rc<dyn Fn(&T) -> Color>>,
    fill_color: Option<Rc<dyn Fn(&T) -> Color>>,
    stroke_width: Option<Rc<dyn Fn(&T) -> f64>>,
    category: Option<String>,
    overlay: bool,
}

impl<T: 'static, D: DomainValue> SeriesBuilder<T, D> {
    fn new(id: String, data: Vec<T>, domain: impl Fn(&T) -> D + 'static) -> Self {
        Self {
            id,
            data: Rc::new(data),
            domain: Rc::new(domain),
            domain_lower: None,
            domain_upper: None,
            measure: None,
            measure_lower: None,
            measure_upper: None,
            color: None,
            fill_color: None,
            stroke_width: None,
            category: None,
            overlay: false,
        }
    }

    #[must_use]
    pub fn measure(mut self, f: impl Fn(&T) -> Option<f64> + 'static) -> Self {
        self.measure = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn domain_bounds(
        mut self,
        lower: impl Fn(&T) -> Option<D> + 'static,
        upper: impl Fn(&T) -> Option<D> + 'static,
    ) -> Self {
        self.domain_lower = Some(Rc::new(lower));
        self.domain_upper = Some(Rc::new(upper));
        self
    }

    #[must_use]
    pub fn measure_bounds(
        mut self,
        lower: impl Fn(&T) -> Option<f64> + 'static,
        upper: impl Fn(&T) -> Option<f64> + 'static,
    ) -> Self {
        self.measure_lower = Some(Rc::new(lower));
        self.measure_upper = Some(Rc::new(upper));
        self
    }

    #[must_use]
    pub fn color(self, color: Color) -> Self {
        self.color_fn(move |_| color)
    }

    #[must_use]
    pub fn color_fn(mut self, f: impl Fn(&T) -> Color + 'static) -> Self {
        self.color = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn fill_color_fn(mut self, f: impl Fn(&T) -> Color + 'static) -> Self {
        self.fill_color = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn stroke_width_fn(mut self, f: impl Fn(&T) -> f64 + 'static) -> Self {
        self.stroke_width = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    #[must_use]
    pub fn build(self) -> Series<D> {
        let len = self.data.len();
        let custom_stroke = self.stroke_width.is_some();

        let domain_fn = erase(self.data.clone(), self.domain);
        let measure_fn = match self.measure {
            Some(f) => erase(self.data.clone(), f),
            None => Rc::new(|_| None) as Rc<dyn Fn(usize) -> Option<f64>>,
        };

        let base_color = match self.color {
            Some(f) => erase(self.data.clone(), f),
            None => Rc::new(|_| Color::BLUE) as Rc<dyn Fn(usize) -> Color>,
        };
        let base_fill = match self.fill_color {
            Some(f) => erase(self.data.clone(), f),
            None => base_color.clone(),
        };
        let base_stroke = match self.stroke_width {
            Some(f) => erase(self.data.clone(), f),
            None => Rc::new(|_| 0.0) as Rc<dyn Fn(usize) -> f64>,
        };

        Series {
            id: self.id,
            category: self.category,
            overlay: self.overlay,
            len,
            domain_fn,
            domain_lower_fn: self.domain_lower.map(|f| erase(self.data.clone(), f)),
            domain_upper_fn: self.domain_upper.map(|f| erase(self.data.clone(), f)),
            measure_fn,
            measure_lower_fn: self.measure_lower.map(|f| erase(self.data.clone(), f)),
            measure_upper_fn: self.measure_upper.map(|f| erase(self.data.clone(), f)),
            color: AccessorStack {
                base: base_color,
                layers: IndexMap::new(),
            },
            fill_color: AccessorStack {
                base: base_fill,
                layers: IndexMap::new(),
            },
            stroke_width: AccessorStack {
                base: base_stroke,
                layers: IndexMap::new(),
            },
            custom_stroke,
        }
    }
}

fn erase<T: 'static, O: 'static>(
    data: Rc<Vec<T>>,
    f: Rc<dyn Fn(&T) -> O>,
) -> Rc<dyn Fn(usize) -> O> {
    Rc::new(move |index| f(&data[index]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> Series<f64> {
        Series::builder("s", vec![(1.0, 10.0), (2.0, 20.0)], |d: &(f64, f64)| d.0)
            .measure(|d| Some(d.1))
            .color(Color::RED)
            .build()
    }

    #[test]
    fn accessors_index_the_typed_data() {
        let series = sample_series();
        assert_eq!(series.len(), 2);
        assert_eq!(series.domain(1), 2.0);
        assert_eq!(series.measure(0), Some(10.0));
        assert_eq!(series.color(0), Color::RED);
    }

    #[test]
    fn layer_replacement_is_idempotent() {
        let mut series = sample_series();
        series
            .color_stack_mut()
            .set_layer("shade", |_, c: Color| c.darker(0.5));
        series
            .color_stack_mut()
            .set_layer("shade", |_, c: Color| c.darker(0.5));

        assert_eq!(series.color(0), Color::RED.darker(0.5));
    }

    #[test]
    fn removed_layer_restores_base_value() {
        let mut series = sample_series();
        series
            .color_stack_mut()
            .set_layer("shade", |_, c: Color| c.darker(0.5));
        assert!(series.color_stack_mut().remove_layer("shade"));
        assert_eq!(series.color(0), Color::RED);
        assert!(!series.color_stack_mut().remove_layer("shade"));
    }

    #[test]
    fn layers_fold_in_insertion_order() {
        let mut stack = AccessorStack::new(|_| 1.0);
        stack.set_layer("double", |_, v: f64| v * 2.0);
        stack.set_layer("add", |_, v: f64| v + 1.0);
        assert_eq!(stack.resolve(0), 3.0);
    }

    #[test]
    fn default_stroke_is_zero_without_custom_accessor() {
        let series = sample_series();
        assert!(!series.has_custom_stroke());
        assert_eq!(series.stroke_width(0), 0.0);
    }
}
