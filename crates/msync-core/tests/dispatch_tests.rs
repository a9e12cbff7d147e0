//! Tests for event classification and dispatch

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use msync_core::{
    Dispatcher, Group, MemoryNotifier, Notification, Notifier, SyncConfig, SyncEvent,
    SyncOutcome, Target, ensure_module,
};
use msync_test_utils::TestModule;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn dispatcher(module: &TestModule, enabled: bool) -> (Dispatcher, Arc<MemoryNotifier>) {
    let config = SyncConfig::load(module.write_config(enabled)).unwrap();
    ensure_module(&config).unwrap();
    let notifier = Arc::new(MemoryNotifier::new());
    let shared: Arc<dyn Notifier> = notifier.clone();
    (Dispatcher::new(config, shared), notifier)
}

#[rstest]
#[case::views("views/a.xml", vec![Target::Manifest(Group::Views)])]
#[case::security("security/groups.xml", vec![Target::Manifest(Group::Security)])]
#[case::controllers_xml("controllers/templates.xml", vec![Target::Manifest(Group::Controllers)])]
#[case::models_xml("models/stray.xml", vec![])]
#[case::nested("views/sub/a.xml", vec![])]
#[case::csv("security/ir.model.access.csv", vec![])]
#[case::init_file("models/__init__.py", vec![])]
#[case::views_py("views/helper.py", vec![])]
fn test_classify(#[case] relative: &str, #[case] expected: Vec<Target>) {
    let module = TestModule::with_standard_layout();
    let (dispatcher, _) = dispatcher(&module, true);

    assert_eq!(dispatcher.classify(&module.path(relative)), expected);
}

#[test]
fn test_classify_python_module() {
    let module = TestModule::with_standard_layout();
    let (dispatcher, _) = dispatcher(&module, true);

    let targets = dispatcher.classify(&module.path("wizard/confirm.py"));

    assert_eq!(targets.len(), 1);
    assert!(matches!(
        &targets[0],
        Target::Initializer { module, .. } if module == "confirm"
    ));
}

#[test]
fn test_handle_updates_manifest_and_initializer() {
    let module = TestModule::with_standard_layout();
    let (dispatcher, _) = dispatcher(&module, true);

    let view = module.write("views/order_views.xml", "<odoo/>");
    let model = module.write("models/sale_order.py", "");
    dispatcher.handle(&SyncEvent::created(&view)).unwrap();
    dispatcher.handle(&SyncEvent::created(&model)).unwrap();

    assert!(module.read("__manifest__.py").contains("        'views/order_views.xml',\n"));
    assert_eq!(module.read("models/__init__.py"), "from . import sale_order");

    let view = module.remove("views/order_views.xml");
    let outcomes = dispatcher.handle(&SyncEvent::deleted(&view)).unwrap();
    assert!(matches!(outcomes[0], SyncOutcome::Disabled { count: 1, .. }));
    assert!(
        module
            .read("__manifest__.py")
            .contains("        # 'views/order_views.xml',\n")
    );
}

#[test]
fn test_disabled_config_ignores_events() {
    let module = TestModule::with_standard_layout();
    let (dispatcher, notifier) = dispatcher(&module, false);
    let before = module.read("__manifest__.py");

    let view = module.write("views/a.xml", "<odoo/>");
    let outcomes = dispatcher.handle(&SyncEvent::created(&view)).unwrap();
    assert!(matches!(outcomes[0], SyncOutcome::Ignored { .. }));
    assert_eq!(dispatcher.dispatch(&SyncEvent::created(&view)), 0);

    assert_eq!(module.read("__manifest__.py"), before);
    assert!(notifier.notifications().is_empty());
}

#[test]
fn test_unwatched_path_is_ignored() {
    let module = TestModule::with_standard_layout();
    let (dispatcher, notifier) = dispatcher(&module, true);

    let stray = module.write("static/description/index.xml", "<odoo/>");
    let outcomes = dispatcher.handle(&SyncEvent::created(&stray)).unwrap();

    assert!(matches!(outcomes[0], SyncOutcome::Ignored { .. }));
    assert_eq!(dispatcher.dispatch(&SyncEvent::created(&stray)), 0);
    assert!(notifier.notifications().is_empty());
}

#[test]
fn test_failure_is_reported_and_next_event_still_runs() {
    let module = TestModule::with_standard_layout();
    let (dispatcher, notifier) = dispatcher(&module, true);
    module.write("__manifest__.py", "{'name': 'broken', 'data':\n    [\n]}\n");

    let view = module.write("views/a.xml", "<odoo/>");
    let model = module.write("models/res_partner.py", "");

    assert_eq!(dispatcher.dispatch(&SyncEvent::created(&view)), 1);
    assert_eq!(dispatcher.dispatch(&SyncEvent::created(&model)), 0);

    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("'data': ["), "{}", errors[0]);
    assert_eq!(
        notifier.notifications().last(),
        Some(&Notification::Info(
            "Added res_partner to __init__.py".to_string()
        ))
    );
}

#[test]
fn test_run_drains_channel_in_order() {
    let module = TestModule::with_standard_layout();
    let (dispatcher, notifier) = dispatcher(&module, true);
    let (tx, rx) = mpsc::channel();

    let producer = {
        let files: Vec<_> = ["zeta", "alpha", "mid"]
            .iter()
            .map(|name| module.write(&format!("models/{name}.py"), ""))
            .collect();
        thread::spawn(move || {
            for file in files {
                tx.send(SyncEvent::created(file)).unwrap();
            }
        })
    };
    dispatcher.run(&rx);
    producer.join().unwrap();

    assert_eq!(
        module.read("models/__init__.py"),
        "from . import alpha\nfrom . import mid\nfrom . import zeta"
    );
    assert_eq!(notifier.notifications().len(), 3);
}

#[test]
fn test_apply_all_keeps_results_after_a_failure() {
    let module = TestModule::with_standard_layout();
    let mut config = SyncConfig::new(module.root());
    config.views_path = Some(module.path("views"));
    config.data_path = Some(module.path("views"));
    let notifier = Arc::new(MemoryNotifier::new());
    let dispatcher = Dispatcher::new(config, notifier.clone());
    module.write("__manifest__.py", "{'name': 'broken', 'data':\n    [\n]}\n");
    let view = module.write("views/a.xml", "<odoo/>");

    let results = dispatcher.apply_all(&SyncEvent::created(&view));

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(Result::is_err));
    assert!(dispatcher.handle(&SyncEvent::created(&view)).is_err());
    assert_eq!(dispatcher.dispatch(&SyncEvent::created(&view)), 2);
    assert_eq!(notifier.errors().len(), 2);
}
