use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson},
    error::ErrorKind,
    options::ClientOptions,
    Client, Database, IndexModel,
};
use tracing::{debug, info};

use super::{Document, DocumentStore, IndexSpec, ID_FIELD};
use crate::error::StoreError;

/// Server error code for `dropIndexes` on a name that does not exist.
const INDEX_NOT_FOUND: i32 = 27;

#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(url: &str, database: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(url).await?;
        let client = Client::with_options(options)?;
        let database = client.database(database);

        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB database {}", database.name());

        Ok(Self { database })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<bson::Document> {
        self.database.collection(name)
    }
}

fn to_json(document: bson::Document) -> Result<Document, StoreError> {
    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(format!(
            "expected a document, got {other}"
        ))),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let found = self
            .collection(collection)
            .find_one(doc! { "_id": id })
            .await?;

        found.map(to_json).transpose()
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let documents: Vec<bson::Document> = self
            .collection(collection)
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;

        documents.into_iter().map(to_json).collect()
    }

    async fn put(&self, collection: &str, id: &str, document: Document) -> Result<(), StoreError> {
        let mut replacement = bson::to_document(&document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        replacement.insert(ID_FIELD, id);

        self.collection(collection)
            .replace_one(doc! { "_id": id }, replacement)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn create_index(&self, collection: &str, index: &IndexSpec) -> Result<String, StoreError> {
        let mut keys = bson::Document::new();
        keys.insert(index.field.clone(), index.order.as_i32());
        let model = IndexModel::builder().keys(keys).build();

        let created = self.collection(collection).create_index(model).await?;
        debug!("Index {} ready on {collection}", created.index_name);
        Ok(created.index_name)
    }

    async fn drop_index(&self, collection: &str, name: &str) -> Result<(), StoreError> {
        match self.collection(collection).drop_index(name).await {
            Ok(()) => Ok(()),
            Err(err) if is_index_not_found(&err) => {
                debug!("Index {name} not present on {collection}, nothing to drop");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn index_names(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let names = self.collection(collection).list_index_names().await?;
        Ok(names.into_iter().filter(|name| name != "_id_").collect())
    }
}

fn is_index_not_found(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => command.code == INDEX_NOT_FOUND,
        _ => false,
    }
}
