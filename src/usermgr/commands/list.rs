use crate::cache::CacheBackend;
use crate::config::{FieldSpec, ManagerConfig};
use crate::error::Result;
use crate::filter::{filter_records, EvalError, ExpressionEvaluator};
use crate::model::{ListStyle, UserRecord};
use crate::pagination::{PaginationInfo, Paginator};
use crate::store::backend::AccountBackend;
use crate::store::UserStore;
use serde::Serialize;

/// Parameters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    pub filter: String,
    pub page: Option<i64>,
    pub list_style: Option<String>,
}

/// Everything a renderer needs to draw the listing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub fields: Vec<FieldSpec>,
    pub list_style: ListStyle,
    pub filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_exception: Option<EvalError>,
    pub pagination: PaginationInfo,
    pub users: Vec<UserRecord>,
}

pub fn run<B, C, E>(
    store: &UserStore<B, C>,
    evaluator: &E,
    config: &ManagerConfig,
    request: &ListRequest,
) -> Result<ListView>
where
    B: AccountBackend,
    C: CacheBackend,
    E: ExpressionEvaluator + ?Sized,
{
    let list_style = request
        .list_style
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.default_list_style);

    let records = store.list_records()?;
    let (filtered, filter_exception) = filter_records(evaluator, records, &request.filter);
    let rows: Vec<UserRecord> = filtered.into_values().collect();

    let mut paginator = Paginator::new(&rows, config.per_page());
    paginator.paginate(request.page);

    Ok(ListView {
        fields: config.add_user_fields.clone(),
        list_style,
        filter: request.filter.clone(),
        filter_exception,
        pagination: paginator.info(),
        users: paginator.paginated_rows().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::filter::jinja::JinjaEvaluator;
    use crate::store::mem_backend::MemBackend;

    fn store_with(count: usize) -> UserStore<MemBackend, MemoryCache> {
        let backend = MemBackend::new();
        for i in 0..count {
            let state = if i % 2 == 0 { "enabled" } else { "disabled" };
            backend.insert(
                UserRecord::new(format!("user{i:02}"))
                    .with_field("state", state)
                    .with_field("age", 20 + i as i64),
            );
        }
        UserStore::new(backend, MemoryCache::new())
    }

    fn request(filter: &str, page: Option<i64>) -> ListRequest {
        ListRequest {
            filter: filter.to_string(),
            page,
            list_style: None,
        }
    }

    fn names(view: &ListView) -> Vec<&str> {
        view.users.iter().map(|u| u.username.as_str()).collect()
    }

    #[test]
    fn first_page_by_default() {
        let store = store_with(25);
        let view = run(
            &store,
            &JinjaEvaluator::new(),
            &ManagerConfig::default(),
            &request("", None),
        )
        .unwrap();

        assert_eq!(view.pagination.current, 1);
        assert_eq!(view.pagination.count, 3);
        assert_eq!(view.pagination.total, 25);
        assert_eq!(view.users.len(), 10);
        assert_eq!(view.users[0].username, "user00");
        assert!(view.filter_exception.is_none());
    }

    #[test]
    fn last_page_is_clamped() {
        let store = store_with(25);
        let view = run(
            &store,
            &JinjaEvaluator::new(),
            &ManagerConfig::default(),
            &request("", Some(99)),
        )
        .unwrap();

        assert_eq!(view.pagination.current, 3);
        assert_eq!(view.pagination.start_offset, 20);
        assert_eq!(view.pagination.end_offset, 24);
        assert_eq!(names(&view), vec!["user20", "user21", "user22", "user23", "user24"]);
    }

    #[test]
    fn filter_applies_before_pagination() {
        let store = store_with(25);
        let view = run(
            &store,
            &JinjaEvaluator::new(),
            &ManagerConfig::default(),
            &request(r#"user.state == "enabled""#, Some(2)),
        )
        .unwrap();

        // 13 enabled users: page 2 holds the last 3.
        assert_eq!(view.pagination.total, 13);
        assert_eq!(view.pagination.count, 2);
        assert_eq!(names(&view), vec!["user20", "user22", "user24"]);
    }

    #[test]
    fn broken_filter_yields_empty_page_and_exception() {
        let store = store_with(5);
        let view = run(
            &store,
            &JinjaEvaluator::new(),
            &ManagerConfig::default(),
            &request("user.age >", None),
        )
        .unwrap();

        assert!(view.users.is_empty());
        assert_eq!(view.pagination.count, 1);
        assert_eq!(view.pagination.total, 0);
        assert_eq!(view.filter_exception.unwrap().expression, "user.age >");
        assert_eq!(view.filter, "user.age >");
    }

    #[test]
    fn list_style_falls_back_to_config() {
        let store = store_with(1);
        let mut config = ManagerConfig::default();
        config.default_list_style = ListStyle::List;
        let evaluator = JinjaEvaluator::new();

        let mut req = request("", None);
        let view = run(&store, &evaluator, &config, &req).unwrap();
        assert_eq!(view.list_style, ListStyle::List);

        req.list_style = Some("table".to_string());
        let view = run(&store, &evaluator, &config, &req).unwrap();
        assert_eq!(view.list_style, ListStyle::List);

        req.list_style = Some("grid".to_string());
        let view = run(&store, &evaluator, &config, &req).unwrap();
        assert_eq!(view.list_style, ListStyle::Grid);
    }

    #[test]
    fn per_page_comes_from_config() {
        let store = store_with(7);
        let mut config = ManagerConfig::default();
        config.pagination.per_page = 3;

        let view = run(&store, &JinjaEvaluator::new(), &config, &request("", Some(3))).unwrap();

        assert_eq!(view.pagination.per_page, 3);
        assert_eq!(view.pagination.count, 3);
        assert_eq!(names(&view), vec!["user06"]);
    }

    #[test]
    fn view_serializes_with_host_keys() {
        let store = store_with(2);
        let view = run(
            &store,
            &JinjaEvaluator::new(),
            &ManagerConfig::default(),
            &request("", None),
        )
        .unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["listStyle"], "grid");
        assert_eq!(json["filter"], "");
        assert!(json.get("filterException").is_none());
        assert_eq!(json["pagination"]["perPage"], 10);
        assert_eq!(json["users"][1]["username"], "user01");
        assert_eq!(json["fields"][0]["type"], "text");
    }
}
