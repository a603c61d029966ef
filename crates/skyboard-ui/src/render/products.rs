//! Text product links, one per product segment.

use std::sync::Arc;

use skyboard_nws::WeatherReport;

use super::{Render, RenderError};
use crate::dialog::DetailSurface;
use crate::dom::Element;
use crate::template::query;

const PRODUCTS_SELECTOR: &str = ".products";

pub struct ProductsRender {
    dialog: Arc<dyn DetailSurface>,
}

impl ProductsRender {
    pub fn new(dialog: Arc<dyn DetailSurface>) -> Self {
        Self { dialog }
    }
}

impl Render<WeatherReport> for ProductsRender {
    fn render(&self, root: &Element, report: &WeatherReport) -> Result<(), RenderError> {
        let products = query(root, PRODUCTS_SELECTOR)?;
        products.clear();

        for product in report.products() {
            for segment in product.segments() {
                let label = Element::new("div")
                    .with_class("product")
                    .with_class(&product.product_code.to_lowercase())
                    .with_text(&product.product_name);

                let link = Element::new("a").with_child(label);
                let dialog = self.dialog.clone();
                let title = product.product_name.clone();
                let text = format!("{}\n\n{}", product.headline(), segment.body);
                link.set_on_click(move || dialog.show(&title, &text));

                products.append_child(link);
            }
        }
        Ok(())
    }
}
