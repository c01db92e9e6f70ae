//! Service - Entry point for every client request.
//!
//! A `Service` owns the configuration, the dataset store, the identity
//! provider and the account directory. Each request method takes the
//! authenticated [`UserId`] explicitly; resolve it first with
//! [`Service::authenticate`].

use std::sync::Arc;

use tabula_core::{Dataset, DatasetId, Error, Result, UserId};
use tabula_query::executor::QueryRunner;
use tabula_storage::ingest::{self, has_allowed_extension, Record};
use tabula_storage::{DatasetStore, UserDirectory};
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::convert::json_to_record;
use crate::identity::IdentityProvider;
use crate::params::{bearer_token, AggregateParams, ListParams, UploadRequest};
use crate::views::{
    AggregateResponse, DatasetView, EmailUpdated, GroupView, MessageResponse, ProfileResponse,
    RowsResponse, UploadReceipt,
};

/// The dataset service.
pub struct Service<S, I> {
    config: ApiConfig,
    store: S,
    identity: I,
    users: UserDirectory,
}

impl<S: DatasetStore, I: IdentityProvider> Service<S, I> {
    /// Creates a service, validating the configuration.
    pub fn new(config: ApiConfig, store: S, identity: I) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            identity,
            users: UserDirectory::new(),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn identity_mut(&mut self) -> &mut I {
        &mut self.identity
    }

    /// Liveness probe.
    pub fn status(&self) -> MessageResponse {
        MessageResponse::new("Server is running")
    }

    /// Resolves an `Authorization` value to a registered user.
    pub fn authenticate(&self, credential: &str) -> Result<UserId> {
        let user = bearer_token(credential).and_then(|token| self.identity.verify(token));
        match user {
            Ok(user) if self.users.contains(&user) => Ok(user),
            Ok(user) => {
                warn!(user = %user, "credential for unknown account");
                Err(Error::Unauthenticated)
            }
            Err(err) => {
                warn!("rejected credential");
                Err(err)
            }
        }
    }

    /// Registers a new account.
    pub fn signup(&mut self, email: &str) -> Result<MessageResponse> {
        let user = self.users.register(email)?;
        info!(user = %user, "account created");
        Ok(MessageResponse::new("User created successfully"))
    }

    pub fn profile(&self, user: &UserId) -> Result<ProfileResponse> {
        if !self.users.contains(user) {
            return Err(Error::not_found("User", user.as_str()));
        }
        Ok(ProfileResponse {
            email: user.to_string(),
        })
    }

    /// Changes the caller's email and moves their datasets with it.
    ///
    /// The identity provider is rebound before anything local changes, so a
    /// provider failure leaves the account and its datasets where they were.
    pub fn update_email(&mut self, user: &UserId, new_email: &str) -> Result<EmailUpdated> {
        let next = self.users.check_change(user, new_email)?;
        let new_token = self.identity.rename_subject(user, &next)?;
        self.users.change_email(user, next.as_str())?;
        let moved = self.store.reassign_owner(user, &next);
        info!(from = %user, to = %next, datasets = moved, "email changed");
        Ok(EmailUpdated {
            message: "Email updated successfully".to_string(),
            new_token,
        })
    }

    /// Stores a parsed file for the caller.
    pub fn upload(&mut self, user: &UserId, request: UploadRequest) -> Result<UploadReceipt> {
        let allowed = &self.config.allowed_extensions;
        if !has_allowed_extension(&request.filename, allowed) {
            return Err(Error::invalid_argument(format!(
                "Invalid file type. Allowed types: {}",
                allowed.join(", ")
            )));
        }
        if request.size > self.config.max_upload_bytes {
            return Err(Error::invalid_argument(format!(
                "File too large. Maximum size is {}",
                self.config.max_upload_label()
            )));
        }

        let records: Vec<Record> = request.records.iter().map(json_to_record).collect();
        let upload = ingest::normalize(&request.filename, request.columns, records)?;
        let rows = upload.len();
        let columns = upload.columns.clone();
        let id = self.store.insert(user, upload)?;
        info!(dataset = %id, rows, columns = columns.len(), "dataset uploaded");

        Ok(UploadReceipt {
            id: id.to_string(),
            filename: request.filename,
            rows,
            columns,
            uploaded_by: user.to_string(),
        })
    }

    pub fn list_datasets(&self, user: &UserId) -> Vec<DatasetView> {
        let datasets = self.store.list(user);
        debug!(user = %user, count = datasets.len(), "listed datasets");
        datasets.iter().map(|ds| DatasetView::from(ds.as_ref())).collect()
    }

    pub fn get_dataset(&self, user: &UserId, id: &str) -> Result<DatasetView> {
        let ds = self.fetch(user, id)?;
        Ok(DatasetView::from(ds.as_ref()))
    }

    /// Returns one page of a dataset's rows after search, filter and sort.
    pub fn list_rows(&self, user: &UserId, id: &str, params: ListParams) -> Result<RowsResponse> {
        let query = params.into_query(&self.config)?;
        let ds = self.fetch(user, id)?;
        let page = QueryRunner::new(&ds).list(&query);
        debug!(
            dataset = %ds.id(),
            total = page.info.total_count,
            returned = page.rows.len(),
            sort_mode = ?page.sort_mode,
            "listed rows"
        );
        Ok(RowsResponse::new(&ds, &page))
    }

    /// Groups a dataset's rows and reduces each group.
    pub fn aggregate(
        &self,
        user: &UserId,
        id: &str,
        params: AggregateParams,
    ) -> Result<AggregateResponse> {
        let query = params.into_query(&self.config)?;
        let ds = self.fetch(user, id)?;
        let groups = QueryRunner::new(&ds).aggregate(&query)?;
        debug!(
            dataset = %ds.id(),
            operation = query.operation.as_str(),
            groups = groups.len(),
            "aggregated rows"
        );
        Ok(AggregateResponse {
            group_by: query.group_by.clone(),
            aggregate_column: query.aggregate_column.clone(),
            operation: query.operation.as_str().to_string(),
            data: groups.iter().map(GroupView::from).collect(),
        })
    }

    pub fn rename_dataset(
        &mut self,
        user: &UserId,
        id: &str,
        new_filename: &str,
    ) -> Result<MessageResponse> {
        if new_filename.trim().is_empty() {
            return Err(Error::invalid_argument("new_filename must not be empty"));
        }
        let id: DatasetId = id.parse()?;
        self.store.rename(id, user, new_filename)?;
        info!(dataset = %id, "dataset renamed");
        Ok(MessageResponse::new("Dataset renamed successfully"))
    }

    pub fn delete_dataset(&mut self, user: &UserId, id: &str) -> Result<MessageResponse> {
        let id: DatasetId = id.parse()?;
        self.store.delete(id, user)?;
        info!(dataset = %id, "dataset deleted");
        Ok(MessageResponse::new("Dataset deleted successfully"))
    }

    fn fetch(&self, user: &UserId, id: &str) -> Result<Arc<Dataset>> {
        let id: DatasetId = id.parse()?;
        self.store.fetch(id, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;
    use tabula_storage::MemoryStore;

    fn service() -> Service<MemoryStore, StaticIdentity> {
        Service::new(ApiConfig::default(), MemoryStore::new(), StaticIdentity::new()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ApiConfig {
            default_limit: 0,
            ..ApiConfig::default()
        };
        assert!(Service::new(config, MemoryStore::new(), StaticIdentity::new()).is_err());
    }

    #[test]
    fn test_status() {
        assert_eq!(service().status().message, "Server is running");
    }

    #[test]
    fn test_authenticate_requires_account() {
        let mut svc = service();
        let ada = UserId::from("ada@example.com");
        let token = svc.identity_mut().issue(&ada);
        assert_eq!(svc.authenticate(&token).unwrap_err(), Error::Unauthenticated);

        svc.signup("ada@example.com").unwrap();
        assert_eq!(svc.authenticate(&format!("Bearer {}", token)).unwrap(), ada);
        assert_eq!(svc.authenticate("Bearer bogus").unwrap_err(), Error::Unauthenticated);
        assert_eq!(svc.authenticate("").unwrap_err(), Error::Unauthenticated);
    }

    #[test]
    fn test_malformed_dataset_id_is_not_found() {
        let mut svc = service();
        svc.signup("ada@example.com").unwrap();
        let ada = UserId::from("ada@example.com");
        assert!(svc.get_dataset(&ada, "not-an-id").unwrap_err().is_not_found());
        assert!(svc.delete_dataset(&ada, "xyz").unwrap_err().is_not_found());
    }
}
