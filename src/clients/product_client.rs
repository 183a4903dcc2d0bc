//! # Product Client
//!
//! High-level API for the `Product` actor. Wraps a `ResourceClient<Product>` and
//! turns runtime failures back into [`ProductError`]s.
use crate::model::{Product, ProductCreate, ProductId, ProductPatch, ScopeId};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use resource_actors::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast_ref::<ProductError>() {
                Some(refused) => refused.clone(),
                None => ProductError::ActorCommunicationError(inner.to_string()),
            },
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Creates a product and returns it as stored.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.inner
            .get(id.clone())
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn patch_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Every product belonging to `scope`.
    #[instrument(skip(self))]
    pub async fn products_in(&self, scope: &ScopeId) -> Result<Vec<Product>, ProductError> {
        let mut products = self.list().await?;
        products.retain(|p| &p.scope == scope);
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Unit;
    use resource_actors::mock::{create_mock_client, expect_update, MockClient};
    use rust_decimal_macros::dec;

    fn product(id: u32, scope: &str, name: &str) -> Product {
        Product {
            id: ProductId(id),
            scope: ScopeId::new(scope),
            name: name.to_string(),
            category: String::new(),
            unit: Unit::Gram,
            price_cents: 0,
            cost_cents: 5,
            current_stock: Some(dec!(1000)),
            tracks_stock: true,
            is_ingredient: true,
            available: true,
            recipe: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_patch_sends_stock_payload() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let patch_task = tokio::spawn(async move {
            product_client
                .patch_product(ProductId(1), ProductPatch::stock(dec!(400)))
                .await
        });

        let (id, patch, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ProductId(1));
        assert_eq!(patch.current_stock, Some(dec!(400)));
        assert_eq!(patch.cost_cents, None);

        let mut flour = product(1, "bakery", "Flour");
        flour.current_stock = Some(dec!(400));
        responder.send(Ok(flour)).unwrap();

        let patched = patch_task.await.unwrap().unwrap();
        assert_eq!(patched.current_stock, Some(dec!(400)));
    }

    #[tokio::test]
    async fn test_products_in_filters_by_scope() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_list().return_ok(vec![
            product(1, "bakery", "Flour"),
            product(2, "cafe", "Beans"),
            product(3, "bakery", "Butter"),
        ]);

        let client = ProductClient::new(mock.client());
        let names: Vec<String> = client
            .products_in(&ScopeId::new("bakery"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Flour", "Butter"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_entity_refusal_keeps_its_type() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(ProductError::EmptyName)));
        mock.expect_update(ProductId(9))
            .return_err(FrameworkError::NotFound("product_9".to_string()));
        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let client = ProductClient::new(mock.client());
        let created = client
            .create_product(ProductCreate::new(ScopeId::new("bakery"), "", Unit::Count))
            .await;
        assert_eq!(created.unwrap_err(), ProductError::EmptyName);

        let patched = client
            .patch_product(ProductId(9), ProductPatch::default())
            .await;
        assert_eq!(
            patched.unwrap_err(),
            ProductError::NotFound("product_9".to_string())
        );

        assert!(matches!(
            client.list().await,
            Err(ProductError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
