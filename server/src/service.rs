use std::{future::Future, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use common::config::SFConfig;

// these are the message-driven services that make up the storefront backend
//
// the http service answers requests from the outside world and has no
// message channel of its own
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ServiceType {
    Theme,
}

// Storefront Service Messages
//
// without higher-kinded types, we use the normal enum-of-enums
// to enable general safe message passing between services
pub type SFMSender = tokio::sync::mpsc::Sender<SFM>;
pub type SFMReceiver = tokio::sync::mpsc::Receiver<SFM>;

// message responses are carried back via oneshot channels.  this
// type eliminates quite a bit of boilerplate in the responder logic.
pub type SFMResp<T> = tokio::sync::oneshot::Sender<Result<T>>;

#[derive(Debug)]
pub enum SFM {
    Theme(crate::theme::msg::ThemeMsg),
}

// service registry
//
// each service is instantiated once and there is one message namespace, which
// lets the generic service traits look up their dependencies via registry()
#[derive(Clone, Debug, Default)]
pub struct SFMRegistry(Arc<DashMap<ServiceType, SFMSender>>);

impl SFMRegistry {
    pub fn new() -> Self {
        SFMRegistry(Arc::new(DashMap::new()))
    }

    pub fn insert(&self, k: ServiceType, v: SFMSender) -> Result<()> {
        match self.0.entry(k) {
            Entry::Vacant(entry) => {
                entry.insert(v);
                Ok(())
            }
            Entry::Occupied(entry) => Err(anyhow::Error::msg(format!(
                "internal error: a sender for {:?} was added twice to the registry",
                entry.key()
            ))),
        }
    }

    pub fn get(&self, k: &ServiceType) -> Result<SFMSender> {
        Ok(self
            .0
            .get(k)
            .ok_or_else(|| {
                anyhow::Error::msg(format!(
                    "internal error: a service was started without a necessary dependency ({:?})",
                    k
                ))
            })?
            .clone())
    }
}

// core service trait
//
// the outer service holds the channel ends and task handles, while the
// SFInner type holds all of the interesting state
#[async_trait]
pub trait StorefrontService: Send + Sync + 'static {
    type Inner: SFInner;

    fn create(config: Arc<SFConfig>, registry: &SFMRegistry) -> Result<Self>
    where
        Self: Sized;

    async fn start(&self, registry: &SFMRegistry) -> Result<()>;
}

// service message responder
//
// in the spirit of tower, each service is a message_handler rpc function.  services
// may respond to external messages on other channels (http) as well.
#[async_trait]
pub trait SFInner: Sized + Send + Sync + 'static {
    async fn new(config: Arc<SFConfig>, registry: SFMRegistry) -> Result<Self>;

    fn registry(&self) -> SFMRegistry;

    async fn message_handler(&self, sfm: SFM) -> Result<()>;

    // rather than have the inner service trait functions (i.e., the rpc calls) respond directly,
    // we define this helper function for use in the message_handler loop
    //
    // this is necessary so that the rpc functions can be used by each other without any weird
    // Option<resp> or the like
    async fn respond<T, Fut>(&self, resp: SFMResp<T>, fut: Fut) -> Result<()>
    where
        T: Send + Sync,
        Fut: Future<Output = Result<T>> + Send,
    {
        resp.send(fut.await).map_err(|_| {
            anyhow::Error::msg(format!(
                "failed to respond to a {} message",
                std::any::type_name::<T>()
            ))
        })
    }
}
