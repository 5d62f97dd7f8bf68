mod translation_orchestrator_test;
