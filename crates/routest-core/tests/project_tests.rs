//! End-to-end tests loading projects from disk

use routest_core::{
    Application, CapturedResponse, Error, LoadOptions, Parameter, ProjectLoader, Property,
    Scenario,
};
use routest_test_utils::TestProject;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

fn load(project: &TestProject) -> Application {
    Application::load(project.root(), &LoadOptions::default()).expect("Should load project")
}

fn names<'a>(scenarios: &[&'a Scenario]) -> Vec<&'a str> {
    scenarios.iter().map(|s| s.name()).collect()
}

fn header_keys(scenario: &Scenario) -> Vec<&str> {
    scenario
        .config()
        .parameters
        .get()
        .map(|p| p.headers.iter().map(|h| h.key.as_str()).collect())
        .unwrap_or_default()
}

mod tree_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_petstore_loads_routes_and_scenarios_in_order() {
        let project = TestProject::petstore();
        let app = load(&project);

        assert_eq!(app.name(), "petstore");
        assert_eq!(app.source, project.root().join("app/app.yaml"));
        let routes: Vec<&str> = app.routes.iter().map(|r| r.name()).collect();
        assert_eq!(routes, vec!["orders", "pets"]);

        // routes by directory name, scenarios by manifest order
        assert_eq!(
            names(&app.scenarios()),
            vec!["get order", "list pets", "create pet"]
        );
    }

    #[test]
    fn test_sources_point_at_files_and_parents() {
        let project = TestProject::petstore();
        let app = load(&project);

        let pets = app.route("pets").expect("Should have pets route");
        assert_eq!(pets.source, project.root().join("routes/pets_route/route.yaml"));
        assert_eq!(pets.parent_source, app.source);

        let create = &pets.scenarios[1];
        assert_eq!(create.source(), project.root().join("routes/pets_route/create.yaml"));
        assert_eq!(create.parent_source(), pets.source);
        assert_eq!(create.config().expected_status, Property::Set(201));
    }

    #[test]
    fn test_scenarios_may_live_outside_route_directory() {
        let project = TestProject::new();
        project.write_app("name: api\n");
        project.add_route(
            "health",
            "name: health\nmethod: GET\npath: /health\nscenarios: [../shared/ping.yaml]\n",
        );
        let shared = project.write_file("routes/shared/ping.yaml", "name: ping\n");

        let app = load(&project);
        let scenarios = app.scenarios();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].source(), shared);
    }

    #[test]
    fn test_project_without_routes_has_no_scenarios() {
        let project = TestProject::new();
        project.write_app("name: empty\n");
        let app = load(&project);
        assert!(app.routes.is_empty());
        assert!(app.scenarios().is_empty());
    }

    #[test]
    fn test_collection_is_rebuilt_each_call() {
        let project = TestProject::petstore();
        let mut app = load(&project);
        assert_eq!(app.scenarios().len(), 3);

        app.routes.pop();
        assert_eq!(names(&app.scenarios()), vec!["get order"]);
    }

    #[test]
    fn test_response_slots_start_empty_and_accept_results() {
        let project = TestProject::petstore();
        let mut app = load(&project);
        assert!(app.routes.iter().all(|r| r.response.is_none()));

        let scenario = &mut app.routes[0].scenarios[0];
        assert!(scenario.response.is_none());
        scenario.response = Some(CapturedResponse {
            status: 200,
            headers: BTreeMap::from([("content-type".into(), "application/json".into())]),
            body: json!({"id": 7}),
        });
        assert_eq!(app.scenarios()[0].response.as_ref().map(|r| r.status), Some(200));
    }
}

mod cascade_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project_with_layers(app: &str, route: &str, scenario: &str) -> TestProject {
        let project = TestProject::new();
        project.write_app(&format!("name: app\n{app}"));
        project.add_route(
            "r",
            &format!("name: r\nmethod: POST\npath: /r\nscenarios: [s.yaml]\n{route}"),
        );
        project.add_scenario("r", "s.yaml", &format!("name: s\n{scenario}"));
        project
    }

    #[test]
    fn test_every_scenario_inherits_application_values() {
        let project = TestProject::petstore();
        let app = load(&project);

        for scenario in app.scenarios() {
            assert_eq!(header_keys(scenario), vec!["Accept"], "{}", scenario.name());
            assert_eq!(
                scenario.config().hooks,
                Property::Set(vec!["auth".to_string()])
            );
            let meta = scenario.config().meta.get().expect("Should have meta");
            assert_eq!(meta["env"], json!(["qa"]));
        }
    }

    #[test]
    fn test_hooks_scenario_first_then_inherited() {
        let project = project_with_layers("hooks: [auth]\n", "hooks: []\n", "hooks: [retry]\n");
        let app = load(&project);
        assert_eq!(
            app.scenarios()[0].config().hooks,
            Property::Set(vec!["retry".to_string(), "auth".to_string()])
        );
    }

    #[test]
    fn test_meta_lists_union_across_levels() {
        let project = project_with_layers(
            "meta:\n  env: [qa]\n",
            "meta:\n  env: [stage]\n",
            "meta:\n  env: [prod, stage]\n",
        );
        let app = load(&project);

        let meta = app.scenarios()[0].config().meta.get().cloned().unwrap();
        let env: HashSet<&str> = meta["env"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(env, HashSet::from(["qa", "stage", "prod"]));
        assert_eq!(meta["env"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_child_values_are_never_overwritten() {
        let project = project_with_layers(
            "parameters:\n  headers:\n    - key: Accept\n      value: application/json\n    - key: X-App\n      value: a\n\
             meta:\n  owner: platform\n",
            "parameters:\n  headers:\n    - key: X-App\n      value: route\n",
            "parameters:\n  headers:\n    - key: Accept\n      value: text/csv\n\
             meta:\n  owner: payments\n",
        );
        let app = load(&project);
        let scenario = app.scenarios()[0];

        let headers = &scenario.config().parameters.get().unwrap().headers;
        assert_eq!(
            headers,
            &vec![
                Parameter::new("Accept", "text/csv"),
                Parameter::new("X-App", "route"),
            ]
        );
        assert_eq!(scenario.config().meta.get().unwrap()["owner"], "payments");

        // the route took its own X-App and the app's Accept
        let route = &app.routes[0];
        let route_headers: Vec<_> = route
            .config
            .parameters
            .get()
            .unwrap()
            .headers
            .iter()
            .map(|p| (p.key.as_str(), p.value.clone()))
            .collect();
        assert_eq!(
            route_headers,
            vec![("X-App", json!("route")), ("Accept", json!("application/json"))]
        );
    }

    #[test]
    fn test_parameter_sections_merge_independently() {
        let project = project_with_layers(
            "parameters:\n  query_params:\n    - key: page\n      value: 1\n",
            "parameters:\n  path_variables:\n    - key: id\n      value: 42\n",
            "",
        );
        let app = load(&project);
        let params = app.scenarios()[0].config().parameters.get().cloned().unwrap();

        assert!(params.headers.is_empty());
        assert_eq!(params.path_variables, vec![Parameter::new("id", 42)]);
        assert_eq!(params.query_params, vec![Parameter::new("page", 1)]);
    }

    #[test]
    fn test_sections_nobody_declares_stay_unset() {
        let project = project_with_layers("", "", "");
        let app = load(&project);
        let config = app.scenarios()[0].config();
        assert!(config.hooks.is_unset());
        assert!(config.meta.is_unset());
        assert!(config.parameters.is_unset());
    }

    #[test]
    fn test_tags_include_inherited_meta_tags() {
        let project = project_with_layers("", "meta:\n  tags: [orders]\n", "meta:\n  tags: [smoke]\n");
        let app = load(&project);
        let tags: Vec<&str> = app.scenarios()[0].tags().iter().collect();
        assert_eq!(tags, vec!["orders", "smoke"]);
    }
}

mod filter_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_boolean_query_selects_in_collection_order() {
        let project = TestProject::petstore();
        let app = load(&project);
        let selected = app
            .filter_by_tags("(smoke or regression) and not slow")
            .expect("Should parse query");
        assert_eq!(names(&selected), vec!["get order", "list pets"]);
    }

    #[test]
    fn test_legacy_query_forms() {
        let project = TestProject::petstore();
        let app = load(&project);

        let run = |query: &str| names(&app.filter_by_tags(query).unwrap()).join(",");
        assert_eq!(run("IS smoke"), "get order,list pets");
        assert_eq!(run("IS NOT smoke"), "create pet");
        assert_eq!(run("smoke AND regression"), "get order");
        assert_eq!(run("slow OR smoke"), "get order,list pets,create pet");
        assert_eq!(run("IN [slow, missing]"), "create pet");
        assert_eq!(run("NOT IN [slow, smoke]"), "");
    }

    #[test]
    fn test_malformed_query_leaves_tree_untouched() {
        let project = TestProject::petstore();
        let app = load(&project);
        let before = names(&app.scenarios()).join(",");

        let err = app.filter_by_tags("(smoke and regression").unwrap_err();
        assert!(matches!(err, Error::MalformedTagExpression { .. }), "{err}");
        assert_eq!(names(&app.scenarios()).join(","), before);
    }
}

mod failure_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_violation_names_file_and_rule() {
        let project = TestProject::new();
        project.write_app("name: api\n");
        let manifest =
            project.add_route("bad", "name: bad\nmethod: FETCH\npath: /bad\n");

        let err = Application::load(project.root(), &LoadOptions::default()).unwrap_err();
        match err {
            Error::ValidationError {
                path,
                instance_path,
                rule,
                ..
            } => {
                assert_eq!(path, manifest);
                assert_eq!(instance_path, "/method");
                assert_eq!(rule, "enum");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_property_is_rejected() {
        let project = TestProject::new();
        project.write_app("description: no name\n");
        let err = Application::load(project.root(), &LoadOptions::default()).unwrap_err();
        assert!(
            matches!(&err, Error::ValidationError { rule, .. } if rule == "required"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_missing_scenario_file_is_invalid_path() {
        let project = TestProject::new();
        project.write_app("name: api\n");
        project.add_route(
            "r",
            "name: r\nmethod: GET\npath: /r\nscenarios: [missing.yaml]\n",
        );

        let err = Application::load(project.root(), &LoadOptions::default()).unwrap_err();
        let expected = project.root().join("routes/r_route/missing.yaml");
        assert!(
            matches!(&err, Error::InvalidPath { path } if *path == expected),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_missing_schema_directory_is_invalid_path() {
        let project = TestProject::petstore();
        let options = LoadOptions::default().with_schema_dir(project.root().join("no-schemas"));
        let err = Application::load(project.root(), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }), "{err}");
    }
}

mod reference_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_documents_may_reference_other_files() {
        let project = TestProject::new();
        project.write_app("name: api\nparameters:\n  $ref: ./shared/parameters.yaml\n");
        project.write_file(
            "app/shared/parameters.yaml",
            "headers:\n  - key: Authorization\n    value: Bearer t\n",
        );
        project.add_route(
            "pets",
            "name: pets\nmethod: POST\npath: /pets\nscenarios: [create.yaml]\n",
        );
        project.add_scenario(
            "pets",
            "create.yaml",
            "name: create\nbody:\n  $ref: ./bodies/pet.json\n",
        );
        project.write_file("routes/pets_route/bodies/pet.json", r#"{"name": "Rex", "age": 3}"#);

        let app = load(&project);
        let scenario = app.scenarios()[0];
        assert_eq!(scenario.config().body, Property::Set(json!({"name": "Rex", "age": 3})));
        assert_eq!(header_keys(scenario), vec!["Authorization"]);
    }

    #[test]
    fn test_reference_cycle_in_data_is_reported() {
        let project = TestProject::new();
        project.write_app("name: api\nmeta:\n  $ref: ./a.yaml\n");
        project.write_file("app/a.yaml", "$ref: ./b.yaml\n");
        project.write_file("app/b.yaml", "$ref: ./a.yaml\n");

        let err = Application::load(project.root(), &LoadOptions::default()).unwrap_err();
        assert!(
            matches!(err, Error::Fs(routest_fs::Error::CyclicReference { .. })),
            "{err}"
        );
    }

    #[test]
    fn test_reference_depth_is_configurable() {
        let project = TestProject::new();
        project.write_app("name: api\nmeta:\n  $ref: ./one.yaml\n");
        project.write_file("app/one.yaml", "$ref: ./two.yaml\n");
        project.write_file("app/two.yaml", "$ref: ./three.yaml\n");
        project.write_file("app/three.yaml", "owner: qa\n");

        // three files deep is enough for the bundled schemas but not for
        // app.yaml -> one -> two -> three
        let shallow = LoadOptions::default().with_max_reference_depth(3);
        let err = Application::load(project.root(), &shallow).unwrap_err();
        match err {
            Error::Fs(routest_fs::Error::ResolutionDepthExceeded { path, limit }) => {
                assert_eq!(limit, 3);
                assert_eq!(path, project.root().join("app/three.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let app = load(&project);
        assert_eq!(app.config.meta.get().unwrap()["owner"], "qa");
    }
}

mod schema_dir_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn copy_bundled_schemas(project: &TestProject) -> PathBuf {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("schema");
        let target = project.root().join("schemas");
        for file in [
            "app_schema.yaml",
            "route_schema.yaml",
            "scenario_schema.yaml",
            "definitions/parameters.yaml",
            "definitions/parameter_list.yaml",
            "definitions/meta.yaml",
            "definitions/hooks.yaml",
        ] {
            let content = std::fs::read_to_string(bundled.join(file)).unwrap();
            project.write_file(&format!("schemas/{file}"), &content);
        }
        target
    }

    #[test]
    fn test_custom_schema_directory_is_used() {
        let project = TestProject::petstore();
        let schemas = copy_bundled_schemas(&project);
        let options = LoadOptions::default().with_schema_dir(&schemas);

        let app = Application::load(project.root(), &options).expect("Should load");
        assert_eq!(app.scenarios().len(), 3);
    }

    #[test]
    fn test_schema_property_without_field_is_rejected() {
        let project = TestProject::petstore();
        let schemas = copy_bundled_schemas(&project);
        project.write_file(
            "schemas/app_schema.yaml",
            "type: object\nproperties:\n  name: {type: string}\n  timeout: {type: integer}\n",
        );

        let options = LoadOptions::default().with_schema_dir(&schemas);
        let err = Application::load(project.root(), &options).unwrap_err();
        match err {
            Error::UnknownSchemaProperty { kind, property, .. } => {
                assert_eq!(kind, "application");
                assert_eq!(property, "timeout");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_schema_is_schema_error() {
        let project = TestProject::petstore();
        let schemas = copy_bundled_schemas(&project);
        project.write_file("schemas/route_schema.yaml", "type: 12\n");

        let options = LoadOptions::default().with_schema_dir(&schemas);
        let err = Application::load(project.root(), &options).unwrap_err();
        assert!(matches!(err, Error::SchemaError { .. }), "{err}");
    }
}

mod environment_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_selected_environment_is_attached() {
        let project = TestProject::petstore();
        project.write_config("qa", "yaml", "host: https://qa.example.com\ntimeout: 5\n");

        let options = LoadOptions::default().with_environment("qa");
        let app = Application::load(project.root(), &options).expect("Should load");

        let env = app.environment.expect("Should have environment config");
        assert_eq!(env.name, "qa");
        assert_eq!(env.get("host"), Some(&json!("https://qa.example.com")));
        assert_eq!(env.source, project.root().join("config/qa.yaml"));
    }

    #[test]
    fn test_dotenv_environment_is_attached() {
        let project = TestProject::petstore();
        project.write_config("stage", "env", "HOST=https://stage.example.com\nTIMEOUT=5\n");

        let options = LoadOptions::default().with_environment("stage");
        let app = Application::load(project.root(), &options).expect("Should load");

        let env = app.environment.expect("Should have environment config");
        assert_eq!(env.get("HOST"), Some(&json!("https://stage.example.com")));
        assert_eq!(env.get("TIMEOUT"), Some(&json!("5")));
        assert_eq!(env.source, project.root().join("config/stage.env"));
    }

    #[test]
    fn test_no_environment_selected_means_no_config() {
        let project = TestProject::petstore();
        project.write_config("qa", "yaml", "host: x\n");
        assert!(load(&project).environment.is_none());
    }

    #[test]
    fn test_missing_environment_file_fails_load() {
        let project = TestProject::petstore();
        let options = LoadOptions::default().with_environment("prod");
        let err = Application::load(project.root(), &options).unwrap_err();
        assert!(
            matches!(&err, Error::EnvironmentConfig { environment, .. } if environment == "prod"),
            "{err}"
        );
    }
}

mod discovery_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_custom_discovery_selects_routes() {
        let project = TestProject::petstore();
        let only_pets = |routes: &Path| -> routest_core::Result<Vec<PathBuf>> {
            Ok(vec![routes.join("pets_route/route.yaml")])
        };

        let app = ProjectLoader::new(LoadOptions::default())
            .with_discovery(only_pets)
            .load(project.root())
            .expect("Should load");

        assert_eq!(names(&app.scenarios()), vec!["list pets", "create pet"]);
    }

    #[test]
    fn test_discovery_errors_abort_load() {
        let project = TestProject::petstore();
        let failing = |routes: &Path| -> routest_core::Result<Vec<PathBuf>> {
            Err(Error::InvalidPath {
                path: routes.to_path_buf(),
            })
        };

        let err = ProjectLoader::new(LoadOptions::default())
            .with_discovery(failing)
            .load(project.root())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }
}
