//! Lesson Widgets
//!
//! Drives the studio from a lesson manifest the way the course pages do:
//! resolve a lesson in its module, print the prev/next navigation, and mount
//! the widgets that lesson embeds.

use gradi::catalog::ModuleCatalog;
use gradi::prelude::*;

const MODULE_JSON: &str = r#"{
    "module": "fundamentos-matematicos",
    "lessons": [
        {"slug": "funciones", "title": "Funciones y activaciones", "order": 1},
        {"slug": "vectores", "title": "Vectores y producto escalar", "order": 2},
        {"slug": "optimizacion", "title": "Descenso del gradiente", "order": 3,
         "description": "Cómo una red aprende: bajar la colina"}
    ],
    "widgets": [
        {"lesson": "optimizacion",
         "viz": {"Descent": {"meta": {"title": "Simulación: descenso del gradiente"},
                 "surface": "bowl", "learning_rate": 0.1, "momentum": false}}},
        {"lesson": "optimizacion",
         "viz": {"FunctionPlot": {"meta": {"title": "Sigmoide"},
                 "spec": {"Sigmoid": {"steepness": 1.0}}}}}
    ]
}"#;

fn main() -> gradi::Result<()> {
    let catalog = ModuleCatalog::from_json(MODULE_JSON)?;

    let Some(page) = catalog.page("optimizacion") else {
        eprintln!("lesson not found in module");
        return Ok(());
    };

    println!("lesson: {}", page.meta.title);
    if let Some(prev) = &page.navigation.prev {
        println!("  prev: {}", prev.title);
    }
    if let Some(next) = &page.navigation.next {
        println!("  next: {}", next.title);
    }

    let mut builder = studio();
    for widget in catalog.widgets_for("optimizacion") {
        builder = builder.viz(widget.viz.clone());
    }
    builder.run_local();

    Ok(())
}
