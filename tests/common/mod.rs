#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use tea_selector::TeaError;
use tea_selector::db::classify::EMPTY_NAME;
use tea_selector::db::{
    Owner, OwnerStorer, OwnerWithTeas, Tea, TeaOwnerStorer, TeaStorer, TeaType, TeaTypeStorer,
    TeaWithOwners, TypeWithTeas, UserStorer,
};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A unique SQLite path under the temp dir; removed on drop.
pub struct TempDb {
    pub path: PathBuf,
}

impl TempDb {
    pub fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!(
            "tea-selector-{tag}-{}-{nanos}-{seq}.sqlite",
            std::process::id()
        ));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm", "-journal"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(side);
        }
    }
}

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn reject_blank(name: &str) -> Result<(), TeaError> {
    if name.trim().is_empty() {
        return Err(TeaError::BadRequest(EMPTY_NAME.to_string()));
    }
    Ok(())
}

#[derive(Default)]
struct FakeData {
    next_type: i64,
    next_owner: i64,
    next_tea: i64,
    types: BTreeMap<i64, String>,
    owners: BTreeMap<i64, String>,
    teas: BTreeMap<i64, (String, i64)>,
    links: BTreeSet<(i64, i64)>,
    users: HashMap<String, String>,
}

impl FakeData {
    fn tea(&self, id: i64) -> Option<Tea> {
        let (name, type_id) = self.teas.get(&id)?;
        Some(Tea {
            id,
            name: name.clone(),
            tea_type: TeaType {
                id: *type_id,
                name: self.types.get(type_id)?.clone(),
            },
        })
    }
}

/// In-memory stand-in for the SQLite stores with the same outcomes.
#[derive(Default)]
pub struct FakeStore {
    data: Mutex<FakeData>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeaTypeStorer for FakeStore {
    async fn list_tea_types(&self) -> Result<Vec<TeaType>, TeaError> {
        let d = self.data.lock().unwrap();
        Ok(d.types
            .iter()
            .map(|(id, name)| TeaType {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn get_tea_type(&self, id: i64) -> Result<TeaType, TeaError> {
        let d = self.data.lock().unwrap();
        d.types
            .get(&id)
            .map(|name| TeaType {
                id,
                name: name.clone(),
            })
            .ok_or_else(|| TeaError::NotFound(format!("tea type {id} does not exist")))
    }

    async fn create_tea_type(&self, name: &str) -> Result<TeaType, TeaError> {
        reject_blank(name)?;
        let mut d = self.data.lock().unwrap();
        if d.types.values().any(|n| n == name) {
            return Err(TeaError::Conflict("tea type already exists".into()));
        }
        d.next_type += 1;
        let id = d.next_type;
        d.types.insert(id, name.to_string());
        Ok(TeaType {
            id,
            name: name.to_string(),
        })
    }

    async fn delete_tea_type(&self, id: i64) -> Result<TeaType, TeaError> {
        let mut d = self.data.lock().unwrap();
        let Some(name) = d.types.get(&id).cloned() else {
            return Err(TeaError::NotFound(format!("tea type {id} does not exist")));
        };
        if d.teas.values().any(|(_, t)| *t == id) {
            return Err(TeaError::Conflict(
                "tea type is still used by one or more teas".into(),
            ));
        }
        d.types.remove(&id);
        Ok(TeaType { id, name })
    }

    async fn list_teas_by_type(&self) -> Result<Vec<TypeWithTeas>, TeaError> {
        let types = self.list_tea_types().await?;
        let teas = self.list_teas().await?;
        Ok(types
            .into_iter()
            .map(|tea_type| TypeWithTeas {
                teas: teas
                    .iter()
                    .filter(|t| t.tea_type.id == tea_type.id)
                    .cloned()
                    .collect(),
                tea_type,
            })
            .collect())
    }
}

#[async_trait]
impl OwnerStorer for FakeStore {
    async fn list_owners(&self) -> Result<Vec<Owner>, TeaError> {
        let d = self.data.lock().unwrap();
        Ok(d.owners
            .iter()
            .map(|(id, name)| Owner {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn get_owner(&self, id: i64) -> Result<Owner, TeaError> {
        let d = self.data.lock().unwrap();
        d.owners
            .get(&id)
            .map(|name| Owner {
                id,
                name: name.clone(),
            })
            .ok_or_else(|| TeaError::NotFound(format!("owner {id} does not exist")))
    }

    async fn create_owner(&self, name: &str) -> Result<Owner, TeaError> {
        reject_blank(name)?;
        let mut d = self.data.lock().unwrap();
        if d.owners.values().any(|n| n == name) {
            return Err(TeaError::Conflict("owner already exists".into()));
        }
        d.next_owner += 1;
        let id = d.next_owner;
        d.owners.insert(id, name.to_string());
        Ok(Owner {
            id,
            name: name.to_string(),
        })
    }

    async fn delete_owner(&self, id: i64) -> Result<Owner, TeaError> {
        let mut d = self.data.lock().unwrap();
        let Some(name) = d.owners.get(&id).cloned() else {
            return Err(TeaError::NotFound(format!("owner {id} does not exist")));
        };
        if d.links.iter().any(|(_, o)| *o == id) {
            return Err(TeaError::Conflict("owner still holds one or more teas".into()));
        }
        d.owners.remove(&id);
        Ok(Owner { id, name })
    }

    async fn list_teas_by_owner(&self) -> Result<Vec<OwnerWithTeas>, TeaError> {
        let owners = self.list_owners().await?;
        let links: Vec<(i64, i64)> = self.data.lock().unwrap().links.iter().copied().collect();
        let mut out = Vec::with_capacity(owners.len());
        for owner in owners {
            let mut teas = Vec::new();
            for (tea_id, _) in links.iter().filter(|(_, o)| *o == owner.id) {
                teas.push(self.get_tea(*tea_id).await?);
            }
            out.push(OwnerWithTeas { owner, teas });
        }
        Ok(out)
    }
}

#[async_trait]
impl TeaStorer for FakeStore {
    async fn list_teas(&self) -> Result<Vec<Tea>, TeaError> {
        let d = self.data.lock().unwrap();
        Ok(d.teas.keys().filter_map(|id| d.tea(*id)).collect())
    }

    async fn get_tea(&self, id: i64) -> Result<Tea, TeaError> {
        let d = self.data.lock().unwrap();
        d.tea(id)
            .ok_or_else(|| TeaError::NotFound(format!("tea {id} does not exist")))
    }

    async fn create_tea(&self, name: &str, tea_type_id: i64) -> Result<Tea, TeaError> {
        let mut d = self.data.lock().unwrap();
        if !d.types.contains_key(&tea_type_id) {
            return Err(TeaError::InvalidReference(
                "tea type does not exist or is missing".into(),
            ));
        }
        reject_blank(name)?;
        if d.teas.values().any(|(n, _)| n == name) {
            return Err(TeaError::Conflict("tea already exists".into()));
        }
        d.next_tea += 1;
        let id = d.next_tea;
        d.teas.insert(id, (name.to_string(), tea_type_id));
        Ok(d.tea(id).expect("just inserted"))
    }

    async fn delete_tea(&self, id: i64) -> Result<Tea, TeaError> {
        let mut d = self.data.lock().unwrap();
        let Some(tea) = d.tea(id) else {
            return Err(TeaError::NotFound(format!("tea {id} does not exist")));
        };
        if d.links.iter().any(|(t, _)| *t == id) {
            return Err(TeaError::Conflict("tea still has one or more owners".into()));
        }
        d.teas.remove(&id);
        Ok(tea)
    }
}

#[async_trait]
impl TeaOwnerStorer for FakeStore {
    async fn create_tea_owner(&self, tea_id: i64, owner_id: i64) -> Result<Tea, TeaError> {
        let mut d = self.data.lock().unwrap();
        if d.links.contains(&(tea_id, owner_id)) {
            return Err(TeaError::Conflict("this relationship already exists".into()));
        }
        if !d.teas.contains_key(&tea_id) || !d.owners.contains_key(&owner_id) {
            return Err(TeaError::InvalidReference(
                "either the tea or owner id do not exist".into(),
            ));
        }
        d.links.insert((tea_id, owner_id));
        Ok(d.tea(tea_id).expect("checked above"))
    }

    async fn delete_tea_owner(&self, tea_id: i64, owner_id: i64) -> Result<(), TeaError> {
        let mut d = self.data.lock().unwrap();
        if !d.links.remove(&(tea_id, owner_id)) {
            return Err(TeaError::NotFound("relationship does not exist".into()));
        }
        Ok(())
    }

    async fn list_owners_of_tea(&self, tea_id: i64) -> Result<Vec<Owner>, TeaError> {
        let d = self.data.lock().unwrap();
        Ok(d.links
            .iter()
            .filter(|(t, _)| *t == tea_id)
            .filter_map(|(_, o)| {
                d.owners.get(o).map(|name| Owner {
                    id: *o,
                    name: name.clone(),
                })
            })
            .collect())
    }

    async fn list_teas_with_owners(&self) -> Result<Vec<TeaWithOwners>, TeaError> {
        let teas = self.list_teas().await?;
        let mut out = Vec::with_capacity(teas.len());
        for tea in teas {
            let owners = self.list_owners_of_tea(tea.id).await?;
            out.push(TeaWithOwners { tea, owners });
        }
        Ok(out)
    }
}

#[async_trait]
impl UserStorer for FakeStore {
    async fn get_password_hash(&self, username: &str) -> Result<String, TeaError> {
        let d = self.data.lock().unwrap();
        d.users
            .get(username)
            .cloned()
            .ok_or_else(|| TeaError::NotFound(format!("user {username:?} doesn't exist")))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<(), TeaError> {
        let mut d = self.data.lock().unwrap();
        if d.users.contains_key(username) {
            return Err(TeaError::Conflict("user already exists".into()));
        }
        d.users
            .insert(username.to_string(), password_hash.to_string());
        Ok(())
    }

    async fn update_password(&self, username: &str, password_hash: &str) -> Result<(), TeaError> {
        let mut d = self.data.lock().unwrap();
        match d.users.get_mut(username) {
            Some(hash) => {
                *hash = password_hash.to_string();
                Ok(())
            }
            None => Err(TeaError::NotFound(format!("user {username:?} doesn't exist"))),
        }
    }
}
