use log::info;

use crate::assembler::RecipeAssembler;
use crate::catalog::{Catalog, SharedCatalog};
use crate::config::{EngineConfig, SelectorConfig, SolverConfig};
use crate::error::Result;
use crate::model::{Ingredient, NutrientTarget, Recipe, SelectionResult};
use crate::renderers::{RecipeRenderer, RendererFactory, TemplateRenderer};
use crate::selector::IngredientSelector;

/// A catalog plus the selector, assembler and renderer that work on it
pub struct RecipeBook {
    catalog: SharedCatalog,
    selector: IngredientSelector,
    assembler: RecipeAssembler,
    renderer: Box<dyn RecipeRenderer>,
}

impl RecipeBook {
    /// Creates a new builder for a recipe book
    ///
    /// # Example
    /// ```
    /// use recipe_book::RecipeBook;
    ///
    /// let book = RecipeBook::builder().build().unwrap();
    /// assert!(!book.catalog().snapshot().is_empty());
    /// ```
    pub fn builder() -> RecipeBookBuilder {
        RecipeBookBuilder::default()
    }

    /// Build everything from loaded configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::embedded()?,
        };

        let renderer = RendererFactory::create(&config.renderer)?;
        info!(
            "Recipe book ready: {} ingredients, '{}' renderer",
            catalog.len(),
            renderer.renderer_name()
        );

        Ok(RecipeBook {
            catalog: SharedCatalog::new(catalog),
            selector: IngredientSelector::new(config.selector),
            assembler: RecipeAssembler::new(config.solver),
            renderer,
        })
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn renderer(&self) -> &dyn RecipeRenderer {
        self.renderer.as_ref()
    }

    /// Rank the current catalog against `target`
    pub fn search(&self, target: &NutrientTarget) -> SelectionResult {
        let catalog = self.catalog.snapshot();
        self.selector.search(&catalog, target)
    }

    /// Portion the given ingredients for `target`
    pub fn generate(&self, ingredients: &[Ingredient], target: &NutrientTarget) -> Result<Recipe> {
        self.assembler.assemble(ingredients, target)
    }

    /// Resolve names against the catalog, then portion them
    pub fn generate_from_names<S: AsRef<str>>(
        &self,
        names: &[S],
        target: &NutrientTarget,
    ) -> Result<Recipe> {
        let ingredients = self.catalog.snapshot().resolve(names)?;
        self.generate(&ingredients, target)
    }

    /// Portion the ingredients, then attach the renderer's text as the narrative
    pub async fn generate_with_narrative(
        &self,
        ingredients: &[Ingredient],
        target: &NutrientTarget,
    ) -> Result<Recipe> {
        crate::generate_recipe_with(&self.assembler, ingredients, target, self.renderer.as_ref())
            .await
    }
}

/// Builder for a [`RecipeBook`] without going through configuration files
#[derive(Default)]
pub struct RecipeBookBuilder {
    catalog: Option<Catalog>,
    selector: Option<SelectorConfig>,
    solver: Option<SolverConfig>,
    renderer: Option<Box<dyn RecipeRenderer>>,
}

impl RecipeBookBuilder {
    /// Use this catalog instead of the embedded one
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn selector(mut self, weights: SelectorConfig) -> Self {
        self.selector = Some(weights);
        self
    }

    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = Some(solver);
        self
    }

    /// Set a renderer for narratives; the template renderer is the default
    pub fn renderer(mut self, renderer: impl RecipeRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn build(self) -> Result<RecipeBook> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Catalog::embedded()?,
        };

        Ok(RecipeBook {
            catalog: SharedCatalog::new(catalog),
            selector: IngredientSelector::new(self.selector.unwrap_or_default()),
            assembler: RecipeAssembler::new(self.solver.unwrap_or_default()),
            renderer: self
                .renderer
                .unwrap_or_else(|| Box::new(TemplateRenderer)),
        })
    }
}
