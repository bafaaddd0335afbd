mod bbox_tests;
