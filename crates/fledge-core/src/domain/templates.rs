//! Built-in Dart templates for a generated feature.
//!
//! Placeholders: `{{PROJECT_NAME}}`, `{{FEATURE_NAME}}`, `{{CLASS_PREFIX}}`.

pub const DOMAIN_REPOSITORY: &str = r#"abstract class {{CLASS_PREFIX}}Repository {

}
"#;

pub const DATA_REPOSITORY_IMPL: &str = r#"import 'package:{{PROJECT_NAME}}/features/{{FEATURE_NAME}}/domain/repositories/{{FEATURE_NAME}}_repository.dart';

class {{CLASS_PREFIX}}RepositoryImpl implements {{CLASS_PREFIX}}Repository {

}
"#;

pub const DI_MODULE: &str = r#"import 'package:{{PROJECT_NAME}}/core/base/base_presenter.dart';
import 'package:{{PROJECT_NAME}}/features/{{FEATURE_NAME}}/data/repositories/{{FEATURE_NAME}}_repository_impl.dart';
import 'package:{{PROJECT_NAME}}/features/{{FEATURE_NAME}}/domain/repositories/{{FEATURE_NAME}}_repository.dart';
import 'package:{{PROJECT_NAME}}/features/{{FEATURE_NAME}}/presentation/presenter/{{FEATURE_NAME}}_presenter.dart';

import 'package:get_it/get_it.dart';

class {{CLASS_PREFIX}}Di {
  static Future<void> setup(GetIt serviceLocator) async {
    //  Data Source

    //  Repository
    serviceLocator.registerLazySingleton<{{CLASS_PREFIX}}Repository>(
      () => {{CLASS_PREFIX}}RepositoryImpl(),
    );

    // Use Cases

    // Presenters
    serviceLocator.registerFactory(
      () => loadPresenter({{CLASS_PREFIX}}Presenter()),
    );
  }
}
"#;

pub const PRESENTER: &str = r#"import 'dart:async';
import 'package:{{PROJECT_NAME}}/core/base/base_presenter.dart';
import 'package:{{PROJECT_NAME}}/core/utility/navigation_helpers.dart';
import 'package:{{PROJECT_NAME}}/features/{{FEATURE_NAME}}/presentation/presenter/{{FEATURE_NAME}}_ui_state.dart';

class {{CLASS_PREFIX}}Presenter extends BasePresenter<{{CLASS_PREFIX}}UiState> {
  final Obs<{{CLASS_PREFIX}}UiState> uiState = Obs<{{CLASS_PREFIX}}UiState>({{CLASS_PREFIX}}UiState.empty());
  {{CLASS_PREFIX}}UiState get currentUiState => uiState.value;

  @override
  Future<void> addUserMessage(String message) async {
    uiState.value = currentUiState.copyWith(userMessage: message);
    showMessage(message: currentUiState.userMessage);
  }

  @override
  Future<void> toggleLoading({required bool loading}) async {
    uiState.value = currentUiState.copyWith(isLoading: loading);
  }
}
"#;

pub const UI_STATE: &str = r#"import 'package:{{PROJECT_NAME}}/core/base/base_ui_state.dart';

class {{CLASS_PREFIX}}UiState extends BaseUiState {
  const {{CLASS_PREFIX}}UiState({required super.isLoading, required super.userMessage});

  factory {{CLASS_PREFIX}}UiState.empty() {
    return {{CLASS_PREFIX}}UiState(isLoading: false, userMessage: '');
  }

  @override
  List<Object?> get props => [isLoading, userMessage];

  //Add more properties to the state

  {{CLASS_PREFIX}}UiState copyWith({bool? isLoading, String? userMessage}) {
    return {{CLASS_PREFIX}}UiState(
      isLoading: isLoading ?? this.isLoading,
      userMessage: userMessage ?? this.userMessage,
    );
  }
}
"#;

pub const PAGE: &str = r#"import 'package:flutter/material.dart';

class {{CLASS_PREFIX}}Page extends StatelessWidget {
  const {{CLASS_PREFIX}}Page({super.key});

  @override
  Widget build(BuildContext context) {
    return Scaffold(
      appBar: AppBar(title: Text('{{CLASS_PREFIX}}')),
      body: Center(child: Text('{{CLASS_PREFIX}}')),
    );
  }
}
"#;
