//! Lesson manifest handed in by the (out-of-scope) content layer.
//!
//! The page system owns MDX loading and routing; what reaches this crate is
//! an ordered list of lesson metadata per course module plus which
//! visualization widgets each lesson embeds. Lookup misses are a "not found"
//! outcome, not an error.

use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};

use crate::core::Viz;
use crate::GradiError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonMeta {
    pub slug: String,
    pub title: String,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Prev/next sibling link shown in the page footer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavLink {
    pub slug: String,
    pub title: String,
    pub order: u32,
}

impl From<&LessonMeta> for NavLink {
    fn from(meta: &LessonMeta) -> Self {
        Self {
            slug: meta.slug.clone(),
            title: meta.title.clone(),
            order: meta.order,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Navigation {
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// A lesson resolved within its module: metadata plus sibling navigation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonPage {
    pub meta: LessonMeta,
    pub navigation: Navigation,
}

/// A visualization widget placed inside a lesson.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonWidget {
    pub lesson: String,
    pub viz: Viz,
}

/// One course module's ordered lessons and widget placements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleCatalog {
    pub module: String,
    pub lessons: Vec<LessonMeta>,
    #[serde(default)]
    pub widgets: Vec<LessonWidget>,
}

impl ModuleCatalog {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let mut catalog: ModuleCatalog = serde_json::from_str(json)
            .map_err(Report::from)
            .change_context(GradiError)
            .attach_printable("failed to parse module catalog JSON")?;
        catalog.lessons.sort_by_key(|l| l.order);
        Ok(catalog)
    }

    /// Lessons in reading order.
    pub fn lessons(&self) -> &[LessonMeta] {
        &self.lessons
    }

    /// Resolve a lesson and its prev/next siblings. `None` when the slug is
    /// not in this module.
    pub fn page(&self, slug: &str) -> Option<LessonPage> {
        let idx = self.lessons.iter().position(|l| l.slug == slug)?;
        let prev = idx.checked_sub(1).map(|i| NavLink::from(&self.lessons[i]));
        let next = self.lessons.get(idx + 1).map(NavLink::from);
        Some(LessonPage {
            meta: self.lessons[idx].clone(),
            navigation: Navigation { prev, next },
        })
    }

    /// Widgets embedded in the given lesson, in declaration order.
    pub fn widgets_for(&self, slug: &str) -> impl Iterator<Item = &LessonWidget> {
        self.widgets.iter().filter(move |w| w.lesson == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ModuleCatalog {
        ModuleCatalog::from_json(
            r#"{
                "module": "fundamentos-matematicos",
                "lessons": [
                    {"slug": "derivadas", "title": "Derivadas", "order": 2},
                    {"slug": "funciones", "title": "Funciones", "order": 1,
                     "description": "Funciones y activaciones"},
                    {"slug": "optimizacion", "title": "Optimización", "order": 3}
                ],
                "widgets": [
                    {"lesson": "optimizacion",
                     "viz": {"Descent": {"meta": {"title": null, "description": null},
                             "surface": "rosenbrock",
                             "learning_rate": 0.05, "momentum": false}}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn lessons_are_sorted_by_order() {
        let c = catalog();
        let slugs: Vec<_> = c.lessons().iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, ["funciones", "derivadas", "optimizacion"]);
    }

    #[test]
    fn navigation_links_siblings() {
        let c = catalog();
        let page = c.page("derivadas").unwrap();
        assert_eq!(page.navigation.prev.unwrap().slug, "funciones");
        assert_eq!(page.navigation.next.unwrap().slug, "optimizacion");

        let first = c.page("funciones").unwrap();
        assert!(first.navigation.prev.is_none());
        let last = c.page("optimizacion").unwrap();
        assert!(last.navigation.next.is_none());
    }

    #[test]
    fn missing_lesson_is_not_found_not_a_crash() {
        assert!(catalog().page("no-such-lesson").is_none());
    }

    #[test]
    fn widgets_resolve_per_lesson() {
        let c = catalog();
        assert_eq!(c.widgets_for("optimizacion").count(), 1);
        assert_eq!(c.widgets_for("funciones").count(), 0);
    }
}
