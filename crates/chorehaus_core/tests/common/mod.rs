#![allow(dead_code)]

use chorehaus_core::{
    Chore, ChoreQuery, ChoreRepository, ChoreStatus, RepoError, RepoResult, User, UserId,
    UserRepository,
};
use chrono::NaiveDate;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn chore(id: &str, duration: u32, deadline: Option<NaiveDate>) -> Chore {
    let mut chore = Chore::new(format!("chore {id}"), duration);
    chore.id = id.to_string();
    chore.deadline_date = deadline;
    chore
}

pub fn assigned(id: &str, duration: u32, deadline: NaiveDate, assignee: &str) -> Chore {
    let mut chore = chore(id, duration, Some(deadline));
    chore.assign_to(assignee);
    chore
}

pub fn completed(
    id: &str,
    frequency: u32,
    deadline: NaiveDate,
    completed_on: NaiveDate,
    assignee: &str,
) -> Chore {
    let mut chore = assigned(id, 20, deadline, assignee);
    chore.frequency = frequency;
    chore.status = ChoreStatus::Completed;
    chore.completion_date = Some(completed_on);
    chore
}

/// In-memory household store that skips validation, so tests can seed
/// shapes SQLite would refuse, and can fail the n-th update on demand.
#[derive(Default)]
pub struct MemoryHousehold {
    chores: RefCell<BTreeMap<String, Chore>>,
    users: RefCell<Vec<User>>,
    updates: Cell<usize>,
    fail_update_at: Cell<Option<usize>>,
}

impl MemoryHousehold {
    pub fn with_users(ids: &[&str]) -> Self {
        let store = Self::default();
        for id in ids {
            store
                .users
                .borrow_mut()
                .push(User::with_id(*id, format!("name-{id}")));
        }
        store
    }

    pub fn insert(&self, chore: Chore) {
        self.chores.borrow_mut().insert(chore.id.clone(), chore);
    }

    pub fn get(&self, id: &str) -> Chore {
        self.chores.borrow()[id].clone()
    }

    pub fn all(&self) -> Vec<Chore> {
        self.chores.borrow().values().cloned().collect()
    }

    /// Makes the `n`-th `update_chore` call (1-based) fail.
    pub fn fail_update_at(&self, n: usize) {
        self.fail_update_at.set(Some(n));
    }
}

impl ChoreRepository for MemoryHousehold {
    fn create_chore(&self, chore: &Chore) -> RepoResult<()> {
        let mut chores = self.chores.borrow_mut();
        if chores.contains_key(&chore.id) {
            return Err(RepoError::DuplicateChoreId(chore.id.clone()));
        }
        chores.insert(chore.id.clone(), chore.clone());
        Ok(())
    }

    fn create_chores(&self, batch: &[Chore]) -> RepoResult<()> {
        let mut chores = self.chores.borrow_mut();
        let mut seen = BTreeSet::new();
        for chore in batch {
            if chores.contains_key(&chore.id) || !seen.insert(chore.id.as_str()) {
                return Err(RepoError::DuplicateChoreId(chore.id.clone()));
            }
        }
        for chore in batch {
            chores.insert(chore.id.clone(), chore.clone());
        }
        Ok(())
    }

    fn update_chore(&self, chore: &Chore) -> RepoResult<()> {
        let count = self.updates.get() + 1;
        self.updates.set(count);
        if self.fail_update_at.get() == Some(count) {
            return Err(RepoError::InvalidData("injected update failure".to_string()));
        }

        let mut chores = self.chores.borrow_mut();
        match chores.get_mut(&chore.id) {
            Some(existing) => {
                *existing = chore.clone();
                Ok(())
            }
            None => Err(RepoError::ChoreNotFound(chore.id.clone())),
        }
    }

    fn get_chore(&self, id: &str) -> RepoResult<Option<Chore>> {
        Ok(self.chores.borrow().get(id).cloned())
    }

    fn list_chores(&self, query: &ChoreQuery) -> RepoResult<Vec<Chore>> {
        Ok(self
            .chores
            .borrow()
            .values()
            .filter(|chore| query.matches(chore))
            .cloned()
            .collect())
    }
}

impl UserRepository for MemoryHousehold {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        self.users.borrow_mut().push(user.clone());
        Ok(())
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut users = self.users.borrow().clone();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    fn list_user_ids(&self) -> RepoResult<Vec<UserId>> {
        Ok(self.list_users()?.into_iter().map(|user| user.id).collect())
    }

    fn get_user_by_name(&self, name: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|user| user.name == name)
            .cloned())
    }
}
