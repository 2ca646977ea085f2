use super::ButtonContext;
use crate::application::placement::Outcome;
use crate::domain::view::ButtonView;
use crate::error::Result;
use tracing::instrument;

/// Places the order straight away. Serves manual/test capture and carts
/// fully paid by gift card.
pub struct ManualHandler {
    ctx: ButtonContext,
    name: &'static str,
    error_test_id: &'static str,
}

impl ManualHandler {
    pub fn new(ctx: ButtonContext, name: &'static str, error_test_id: &'static str) -> Self {
        Self {
            ctx,
            name,
            error_test_id,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn context(&self) -> &ButtonContext {
        &self.ctx
    }

    #[instrument(skip(self), fields(handler = self.name, cart_id = %self.ctx.cart.id))]
    pub async fn press(&self) -> Result<Outcome> {
        if self.ctx.not_ready {
            return Ok(Outcome::Ignored);
        }
        self.ctx.state.begin()?;
        Ok(self.ctx.placer.complete(&self.ctx.cart.id, &self.ctx.state).await)
    }

    pub fn view(&self) -> ButtonView {
        self.ctx.place_order_view(self.error_test_id, false)
    }
}
